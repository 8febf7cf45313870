//! Shared forecasting pipeline used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> split -> trend fit -> projection -> reconciliation -> insights
//!
//! Each call owns all of its state, so independent calls can run in parallel.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{EngineConfig, ForecastPoint, ForecastRecord, InsightSet, ProductLine, SalesTable, TrendFit};
use crate::error::EngineError;
use crate::fit::split::Split;
use crate::forecast::{assemble_records, distinct_product_lines, project};
use crate::io::ingest::load_sales_table;
use crate::report::insights::summarize;

/// All computed outputs of a single forecast run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub table: SalesTable,
    pub split: Split,
    pub fit: TrendFit,
    pub max_year: i32,
    pub points: Vec<ForecastPoint>,
    pub product_lines: Vec<ProductLine>,
    pub records: Vec<ForecastRecord>,
    pub insights: InsightSet,
}

/// Load a CSV file and run the full engine on it.
pub fn run_forecast(path: &Path, engine: &EngineConfig) -> Result<ForecastRun, EngineError> {
    let table = load_sales_table(path, engine.preview_rows)?;
    info!(path = %path.display(), rows = table.len(), "loaded sales table");
    run_engine(table, engine)
}

/// Run the engine on an already validated table.
pub fn run_engine(table: SalesTable, engine: &EngineConfig) -> Result<ForecastRun, EngineError> {
    let max_year = table
        .max_year()
        .ok_or(EngineError::InsufficientData { rows: 0, needed: 1 })?;

    // 1) Split + fit.
    let split = crate::fit::train_test_split(table.len(), engine.test_fraction, engine.seed)?;
    debug!(train = split.train.len(), test = split.test.len(), seed = engine.seed, "split rows");
    let fit = crate::fit::fit_trend(&table.records, &split)?;

    // 2) Project the next years.
    let points = project(&fit.model, max_year)?;

    // 3) Reconcile onto product lines.
    let product_lines = distinct_product_lines(&table.records);
    let records = assemble_records(&product_lines, &points);
    info!(
        product_lines = product_lines.len(),
        records = records.len(),
        first_year = points.first().map(|p| p.year),
        "reconciled forecast"
    );

    // 4) Insights from the historical table.
    let insights = summarize(&table.records)?;

    Ok(ForecastRun {
        table,
        split,
        fit,
        max_year,
        points,
        product_lines,
        records,
        insights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FORECAST_HORIZON, GrowthRate};
    use crate::io::ingest::read_sales_table;

    fn run(csv: &str) -> Result<ForecastRun, EngineError> {
        let engine = EngineConfig::default();
        let table = read_sales_table(csv.as_bytes(), engine.preview_rows)?;
        run_engine(table, &engine)
    }

    #[test]
    fn record_count_is_min_of_lines_and_horizon() {
        let mut csv = String::from("Company,Manufacturer,Model,Year,Sales\n");
        for (i, model) in ["a", "b", "c"].iter().enumerate() {
            csv.push_str(&format!("C{i},Mk,{model},{},{}\n", 2018 + i, 100 + 10 * i));
        }
        let out = run(&csv).unwrap();
        assert_eq!(out.points.len(), FORECAST_HORIZON);
        assert_eq!(out.product_lines.len(), 3);
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].year, 2021);
    }

    #[test]
    fn single_row_table_completes() {
        let out = run("Company,Manufacturer,Model,Year,Sales\nA,Mk,m1,2020,10.5\n").unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].year, 2021);
        assert_eq!(out.records[0].predicted_sales, 10);
        assert_eq!(out.insights.growth, GrowthRate::NotApplicable);
    }

    #[test]
    fn header_only_table_is_insufficient() {
        let err = run("Company,Manufacturer,Model,Year,Sales\n").unwrap_err();
        assert_eq!(err, EngineError::InsufficientData { rows: 0, needed: 1 });
    }

    #[test]
    fn runs_are_reproducible() {
        let mut csv = String::from("Company,Manufacturer,Model,Year,Sales\n");
        for i in 0..20 {
            csv.push_str(&format!("C{},Mk,m{},{},{}\n", i % 4, i % 6, 2000 + i, 50 + (i * 37) % 23));
        }
        let a = run(&csv).unwrap();
        let b = run(&csv).unwrap();
        assert_eq!(a.split, b.split);
        assert_eq!(a.records, b.records);
        assert_eq!(a.fit.model, b.fit.model);
    }
}
