//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and reconciliation
//! - exported to JSON/CSV
//! - handed to presentation code (terminal tables, charts)

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of future years projected past the latest observed year.
pub const FORECAST_HORIZON: usize = 5;

/// Semantic columns every input table must expose after header normalization.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Company", "Manufacturer", "Model", "Year", "Sales"];

/// One validated row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub company: String,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    /// Units sold (non-negative).
    pub sales: f64,
}

/// A validated input table.
///
/// Records keep file order; nothing downstream mutates the table.
#[derive(Debug, Clone)]
pub struct SalesTable {
    /// All normalized headers, in file order (including non-required columns).
    pub headers: Vec<String>,
    pub records: Vec<SalesRecord>,
    /// The first raw rows (all columns), for preview rendering.
    pub preview: Vec<Vec<String>>,
}

impl SalesTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }
}

/// Fitted linear trend `sales = intercept + slope * year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    pub fn predict(&self, year: i32) -> f64 {
        self.intercept + self.slope * f64::from(year)
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// Coefficient of determination; `None` when the observed sales have no variance.
    pub r2: Option<f64>,
    pub n: usize,
}

/// Trend fit output: model plus in-sample and hold-out diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFit {
    pub model: TrendModel,
    pub train: FitQuality,
    /// Quality on the evaluation partition; `None` when the partition is empty.
    pub holdout: Option<FitQuality>,
}

/// A distinct (company, manufacturer, model) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductLine {
    pub company: String,
    pub manufacturer: String,
    pub model: String,
}

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub predicted_sales: f64,
}

/// A forecast year reconciled onto a product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub company: String,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    /// Predicted sales truncated toward zero.
    pub predicted_sales: i64,
}

impl ForecastRecord {
    /// Tuple view consumed by chart/table renderers.
    pub fn as_tuple(&self) -> (&str, &str, &str, i32, i64) {
        (
            &self.company,
            &self.manufacturer,
            &self.model,
            self.year,
            self.predicted_sales,
        )
    }
}

/// Average period-over-period growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum GrowthRate {
    /// Mean percentage change between consecutive rows.
    Percent(f64),
    /// No consecutive pair had a defined percentage change.
    NotApplicable,
}

/// Derived business insights.
///
/// Fields are labeled; `lines()` renders them in the fixed presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub growth: GrowthRate,
    pub best_model: String,
    pub top_company: String,
    pub production_recommendation: String,
    pub marketing_recommendation: String,
}

/// Per-invocation engine settings.
///
/// The engine reads nothing else: no environment, no globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Seed for the train/evaluation split.
    pub seed: u64,
    /// Fraction of rows held out for evaluation (0.0 ≤ f < 1.0).
    pub test_fraction: f64,
    /// Number of raw rows kept for preview.
    pub preview_rows: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            preview_rows: 5,
        }
    }
}

/// A `salesfc forecast` run as understood by the CLI layer.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub csv_path: PathBuf,
    pub engine: EngineConfig,
    pub json: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

/// A saved forecast report (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub input: PathBuf,
    pub seed: u64,
    pub test_fraction: f64,
    pub rows: usize,
    pub trend: TrendFit,
    pub forecast_points: Vec<ForecastPoint>,
    pub product_lines: Vec<ProductLine>,
    pub records: Vec<ForecastRecord>,
    pub insights: InsightSet,
    /// Insights rendered in presentation order.
    pub insight_lines: Vec<String>,
    /// Forecast bar chart as a base64 SVG `data:` URI.
    #[serde(default)]
    pub chart: Option<String>,
}
