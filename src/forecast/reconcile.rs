//! Product-line reconciliation.
//!
//! Forecast points are attached to product lines purely by position: the
//! first point goes to the first distinct line, and so on. The two sequences
//! have unrelated lengths, so the shorter one decides how many records exist.

use std::collections::HashSet;

use crate::domain::{ForecastPoint, ForecastRecord, ProductLine, SalesRecord};

/// Distinct (company, manufacturer, model) triples in first-seen order.
pub fn distinct_product_lines(records: &[SalesRecord]) -> Vec<ProductLine> {
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut out = Vec::new();
    for r in records {
        if seen.insert((r.company.as_str(), r.manufacturer.as_str(), r.model.as_str())) {
            out.push(ProductLine {
                company: r.company.clone(),
                manufacturer: r.manufacturer.clone(),
                model: r.model.clone(),
            });
        }
    }
    out
}

/// Zip product lines with forecast points, truncating to the shorter sequence.
///
/// Predicted sales are truncated toward zero (`-3.7` becomes `-3`).
pub fn assemble_records(lines: &[ProductLine], points: &[ForecastPoint]) -> Vec<ForecastRecord> {
    lines
        .iter()
        .zip(points)
        .map(|(line, point)| ForecastRecord {
            company: line.company.clone(),
            manufacturer: line.manufacturer.clone(),
            model: line.model.clone(),
            year: point.year,
            predicted_sales: point.predicted_sales.trunc() as i64,
        })
        .collect()
}
