//! Read/write forecast report JSON files.
//!
//! The report is the "portable" representation of a run:
//! - input path + split settings
//! - fitted trend and its diagnostics
//! - forecast points, reconciled records and insights
//! - the forecast chart, encoded as a `data:` URI
//!
//! The schema is defined by `domain::ReportFile`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::app::pipeline::ForecastRun;
use crate::domain::{ForecastConfig, ReportFile};
use crate::error::AppError;

/// Build the serializable report for a completed run.
pub fn build_report(run: &ForecastRun, config: &ForecastConfig) -> Result<ReportFile, AppError> {
    let chart = crate::plot::render_data_uri(&run.records)?;
    Ok(ReportFile {
        tool: "salesfc".to_string(),
        generated_at: chrono::Local::now(),
        input: config.csv_path.clone(),
        seed: config.engine.seed,
        test_fraction: config.engine.test_fraction,
        rows: run.table.len(),
        trend: run.fit.clone(),
        forecast_points: run.points.clone(),
        product_lines: run.product_lines.clone(),
        records: run.records.clone(),
        insights: run.insights.clone(),
        insight_lines: run.insights.lines(),
        chart: Some(chart),
    })
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, report: &ReportFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
