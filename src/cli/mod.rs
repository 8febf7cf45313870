//! Command-line parsing for the sales forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/reconciliation code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salesfc", version, about = "Vehicle sales trend forecaster")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the sales trend, print insights and the 5-year forecast, optionally export.
    Forecast(ForecastArgs),
    /// Check a CSV against the required schema without forecasting.
    Validate(ValidateArgs),
    /// Forecast several CSV files in parallel and print a one-line summary per file.
    Batch(BatchArgs),
    /// Render the bar chart from a previously exported report JSON.
    Chart(ChartArgs),
}

/// Split settings shared by every command that fits a trend.
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Random seed for the train/evaluation split.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,
}

#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// Sales CSV (columns: Company, Manufacturer, Model, Year, Sales).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of input rows shown in the preview.
    #[arg(long, default_value_t = 5)]
    pub preview: usize,

    /// Print the full report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Export forecast records to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Export the full report to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Write the forecast bar chart as SVG.
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Sales CSV to check.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,
}

#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// Sales CSV files to forecast.
    #[arg(required = true, value_name = "CSV")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Debug, Parser)]
pub struct ChartArgs {
    /// Report JSON produced by `salesfc forecast --export-json`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Output SVG path.
    #[arg(long, value_name = "SVG")]
    pub out: PathBuf,
}
