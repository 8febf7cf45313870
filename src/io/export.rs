//! Export reconciled forecasts to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ForecastRecord;
use crate::error::AppError;

/// Write forecast records to a CSV file.
pub fn write_forecast_csv(path: &Path, records: &[ForecastRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_forecast_records(file, records)
}

/// Write forecast records as CSV to any writer.
///
/// Columns: `company,manufacturer,model,year,predicted_sales`.
pub fn write_forecast_records<W: Write>(out: W, records: &[ForecastRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for r in records {
        writer
            .serialize(r)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    // An empty record list still gets a header line.
    if records.is_empty() {
        writer
            .write_record(["company", "manufacturer", "model", "year", "predicted_sales"])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
