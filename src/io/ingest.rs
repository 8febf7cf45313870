//! CSV ingest and schema validation.
//!
//! This module is responsible for turning an uploaded sales CSV into a
//! validated `SalesTable`.
//!
//! Design goals:
//! - **Strict schema** for required columns, checked before any row is parsed
//! - **Whole-table validation**: one bad `Year`/`Sales` cell rejects the table
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{REQUIRED_COLUMNS, SalesRecord, SalesTable};
use crate::error::EngineError;

/// Open and validate a CSV file.
pub fn load_sales_table(path: &Path, preview_rows: usize) -> Result<SalesTable, EngineError> {
    let file = File::open(path).map_err(|e| {
        EngineError::data_type(format!("failed to open CSV '{}': {e}", path.display()))
    })?;
    read_sales_table(file, preview_rows)
}

/// Validate CSV content from any reader.
pub fn read_sales_table<R: Read>(input: R, preview_rows: usize) -> Result<SalesTable, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let raw_headers = reader
        .headers()
        .map_err(|e| EngineError::data_type(format!("failed to read CSV headers: {e}")))?
        .clone();

    let headers: Vec<String> = raw_headers.iter().map(normalize_header_name).collect();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let columns = RequiredColumns::resolve(&header_map);
    let mut records = Vec::new();
    let mut preview = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| EngineError::data_type(format!("line {line}: CSV parse error: {e}")))?;

        if preview.len() < preview_rows {
            preview.push(record.iter().map(str::to_string).collect());
        }
        records.push(parse_row(&record, &columns, line)?);
    }

    debug!(rows = records.len(), columns = headers.len(), "validated sales table");

    Ok(SalesTable {
        headers,
        records,
        preview,
    })
}

/// Normalize a header: trim surrounding whitespace, then replace spaces with underscores.
///
/// Casing is left untouched, so `" year "` becomes `"year"`, not `"Year"`.
pub fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report the first column as missing.
    let name = name.trim_start_matches('\u{feff}').trim();
    name.replace(' ', "_")
}

fn build_header_map(headers: &[String]) -> HashMap<&str, usize> {
    let mut map = HashMap::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        map.entry(name.as_str()).or_insert(idx);
    }
    map
}

fn ensure_required_columns_exist(header_map: &HashMap<&str, usize>) -> Result<(), EngineError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !header_map.contains_key(*name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Schema { missing })
    }
}

/// Column indices of the required fields.
struct RequiredColumns {
    company: usize,
    manufacturer: usize,
    model: usize,
    year: usize,
    sales: usize,
}

impl RequiredColumns {
    /// Only called after `ensure_required_columns_exist` succeeded.
    fn resolve(header_map: &HashMap<&str, usize>) -> Self {
        let idx = |name: &str| header_map.get(name).copied().unwrap_or(usize::MAX);
        Self {
            company: idx("Company"),
            manufacturer: idx("Manufacturer"),
            model: idx("Model"),
            year: idx("Year"),
            sales: idx("Sales"),
        }
    }
}

fn parse_row(record: &StringRecord, columns: &RequiredColumns, line: usize) -> Result<SalesRecord, EngineError> {
    let company = get_required(record, columns.company, "Company", line)?.to_string();
    let manufacturer = get_required(record, columns.manufacturer, "Manufacturer", line)?.to_string();
    let model = get_required(record, columns.model, "Model", line)?.to_string();
    let year = parse_year(get_required(record, columns.year, "Year", line)?, line)?;
    let sales = parse_sales(get_required(record, columns.sales, "Sales", line)?, line)?;

    Ok(SalesRecord {
        company,
        manufacturer,
        model,
        year,
        sales,
    })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str, line: usize) -> Result<&'a str, EngineError> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::data_type(format!("line {line}: missing value for `{name}`")))
}

fn parse_year(s: &str, line: usize) -> Result<i32, EngineError> {
    if let Ok(year) = s.parse::<i32>() {
        return Ok(year);
    }

    // Spreadsheet exports sometimes write integral columns as floats ("2020.0").
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => {
            Ok(v as i32)
        }
        _ => Err(EngineError::data_type(format!(
            "line {line}: invalid `Year` value '{s}' (expected an integer)"
        ))),
    }
}

fn parse_sales(s: &str, line: usize) -> Result<f64, EngineError> {
    let v = s.parse::<f64>().map_err(|_| {
        EngineError::data_type(format!("line {line}: invalid `Sales` value '{s}' (expected a number)"))
    })?;
    if !v.is_finite() {
        return Err(EngineError::data_type(format!(
            "line {line}: `Sales` value '{s}' is not finite"
        )));
    }
    if v < 0.0 {
        return Err(EngineError::data_type(format!(
            "line {line}: `Sales` value '{s}' is negative"
        )));
    }
    Ok(v)
}
