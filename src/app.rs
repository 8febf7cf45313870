//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - runs the forecasting pipeline
//! - prints reports
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{BatchArgs, ChartArgs, Command, EngineArgs, ForecastArgs, ValidateArgs};
use crate::domain::{EngineConfig, ForecastConfig};
use crate::error::{AppError, EngineError};
use crate::forecast::distinct_product_lines;

pub mod pipeline;

/// Entry point for the `salesfc` binary.
pub fn run() -> Result<(), AppError> {
    // We want `salesfc sales.csv` to behave like `salesfc forecast --csv sales.csv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing(cli.verbose);

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Validate(args) => handle_validate(args),
        Command::Batch(args) => handle_batch(args),
        Command::Chart(args) => handle_chart(args),
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` (optionally from `.env`) wins over `-v` flags.
fn init_tracing(verbose: u8) {
    dotenvy::dotenv().ok();
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = forecast_config_from_args(&args);
    let rendered = execute_forecast(&config)?;
    println!("{rendered}");
    Ok(())
}

/// Run a forecast, write every requested file and return the text for stdout.
///
/// Nothing is returned for printing unless all exports succeeded.
pub fn execute_forecast(config: &ForecastConfig) -> Result<String, AppError> {
    let run = pipeline::run_forecast(&config.csv_path, &config.engine)?;

    let report = crate::io::report::build_report(&run, config)?;
    let rendered = if config.json {
        serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::new(4, format!("Failed to serialize report: {e}")))?
    } else {
        crate::report::format_run_summary(&run, &config.csv_path.display().to_string())
    };

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_forecast_csv(path, &run.records)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::report::write_report_json(path, &report)?;
    }
    if let Some(path) = &config.chart {
        crate::plot::write_chart_svg(path, &run.records)?;
    }

    Ok(rendered)
}

fn handle_validate(args: ValidateArgs) -> Result<(), AppError> {
    let table = crate::io::ingest::load_sales_table(&args.csv, 0)?;
    let lines = distinct_product_lines(&table.records);
    let years = table
        .records
        .iter()
        .map(|r| r.year)
        .fold(None, |acc: Option<(i32, i32)>, y| match acc {
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            None => Some((y, y)),
        });

    println!("OK: {}", args.csv.display());
    println!("columns: {}", table.headers.join(", "));
    println!("rows: {} | product lines: {}", table.len(), lines.len());
    match years {
        Some((lo, hi)) => println!("years: {lo}..={hi}"),
        None => println!("years: (no rows)"),
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = engine_config_from_args(&args.engine, 0);

    let results = batch_runs(&args.files, &engine);

    let mut worst_exit = 0u8;
    let mut failures = 0usize;
    for (path, result) in &results {
        match result {
            Ok(run) => println!(
                "{}: rows={} lines={} records={} slope={:.3} | {}",
                path.display(),
                run.table.len(),
                run.product_lines.len(),
                run.records.len(),
                run.fit.model.slope,
                run.insights.lines()[0]
            ),
            Err(err) => {
                failures += 1;
                worst_exit = worst_exit.max(err.exit_code());
                println!("{}: FAILED: {err}", path.display());
            }
        }
    }

    if failures > 0 {
        return Err(AppError::new(
            worst_exit,
            format!("{failures} of {} file(s) failed.", results.len()),
        ));
    }
    Ok(())
}

/// Forecast every file as an independent engine invocation, in parallel.
///
/// Results keep input order; one failing file does not affect the others.
pub fn batch_runs(files: &[PathBuf], engine: &EngineConfig) -> Vec<(PathBuf, Result<pipeline::ForecastRun, EngineError>)> {
    files
        .par_iter()
        .map(|path| (path.clone(), pipeline::run_forecast(path, engine)))
        .collect()
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let report = crate::io::report::read_report_json(&args.report)?;
    crate::plot::write_chart_svg(&args.out, &report.records)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

pub fn engine_config_from_args(args: &EngineArgs, preview_rows: usize) -> EngineConfig {
    EngineConfig {
        seed: args.seed,
        test_fraction: args.test_fraction,
        preview_rows,
    }
}

pub fn forecast_config_from_args(args: &ForecastArgs) -> ForecastConfig {
    ForecastConfig {
        csv_path: args.csv.clone(),
        engine: engine_config_from_args(&args.engine, args.preview),
        json: args.json,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
        chart: args.chart.clone(),
    }
}

/// Rewrite argv so a bare CSV path means `forecast --csv <path>`.
///
/// Rules:
/// - `salesfc`                      -> unchanged (clap prints usage)
/// - `salesfc data.csv ...`         -> `salesfc forecast --csv data.csv ...`
/// - `salesfc --help/--version/-h`  -> unchanged
/// - `salesfc <subcommand> ...`     -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_subcommand = matches!(arg1.as_str(), "forecast" | "validate" | "batch" | "chart" | "help");
    if is_subcommand || arg1.starts_with('-') {
        return argv;
    }

    if arg1.to_ascii_lowercase().ends_with(".csv") {
        argv.insert(1, "--csv".to_string());
        argv.insert(1, "forecast".to_string());
    }
    argv
}
