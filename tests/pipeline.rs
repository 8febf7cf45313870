//! Integration tests for the forecasting pipeline.
//!
//! These drive the public API end to end: CSV text in, records and insights out.

use sales_forecast::domain::{FORECAST_HORIZON, GrowthRate};
use sales_forecast::error::EngineError;
use sales_forecast::io::ingest::read_sales_table;
use sales_forecast::{EngineConfig, ForecastRun, run_engine, run_forecast};

fn run_csv(csv: &str) -> Result<ForecastRun, EngineError> {
    let engine = EngineConfig::default();
    let table = read_sales_table(csv.as_bytes(), engine.preview_rows)?;
    run_engine(table, &engine)
}

// ---------------------------------------------------------------------------
// Demo dataset
// ---------------------------------------------------------------------------
#[test]
fn demo_file_forecasts_five_lines() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/car_sales.csv");
    let run = run_forecast(&path, &EngineConfig::default()).unwrap();

    assert_eq!(run.table.len(), 14);
    assert_eq!(run.table.preview.len(), 5);
    assert_eq!(run.max_year, 2022);
    // Toyota/Corolla, Toyota/Camry, Honda/Civic, Ford/F-150, Tesla/Model 3, ...
    assert!(run.product_lines.len() > FORECAST_HORIZON);
    assert_eq!(run.records.len(), FORECAST_HORIZON);

    let pairs: Vec<(&str, i32)> = run.records.iter().map(|r| (r.model.as_str(), r.year)).collect();
    assert_eq!(
        pairs,
        vec![
            ("Corolla", 2023),
            ("Camry", 2024),
            ("Civic", 2025),
            ("F-150", 2026),
            ("Model 3", 2027),
        ]
    );

    // F-150 sums to 4690, the largest per model; Toyota sums to 5730.
    assert_eq!(run.insights.best_model, "F-150");
    assert_eq!(run.insights.top_company, "Toyota");
    assert_eq!(run.split.test.len(), 3);
    assert!(run.fit.holdout.is_some());
}

// ---------------------------------------------------------------------------
// Forecast points and reconciliation
// ---------------------------------------------------------------------------
#[test]
fn forecast_years_follow_max_year_regardless_of_row_order() {
    let run = run_csv(
        "Company,Manufacturer,Model,Year,Sales\n\
         A,Mk,m1,2019,10\n\
         A,Mk,m2,2023,30\n\
         A,Mk,m3,2021,20\n",
    )
    .unwrap();
    let years: Vec<i32> = run.points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2024, 2025, 2026, 2027, 2028]);
    assert_eq!(run.records.len(), 3);
}

#[test]
fn one_product_line_yields_one_record() {
    let run = run_csv(
        "Company,Manufacturer,Model,Year,Sales\n\
         A,Mk,m1,2018,100\n\
         A,Mk,m1,2019,110\n\
         A,Mk,m1,2020,120\n\
         A,Mk,m1,2021,130\n",
    )
    .unwrap();
    assert_eq!(run.points.len(), FORECAST_HORIZON);
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].year, 2022);
}

#[test]
fn records_truncate_predictions() {
    let run = run_csv(
        "Company,Manufacturer,Model,Year,Sales\n\
         A,Mk,m1,2020,10.9\n\
         B,Mk,m2,2020,10.9\n",
    )
    .unwrap();
    // Flat trend at 10.9 -> every record truncates to 10.
    assert!(run.records.iter().all(|r| r.predicted_sales == 10));
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------
#[test]
fn growth_and_summed_leaders() {
    let run = run_csv(
        "Company,Manufacturer,Model,Year,Sales\n\
         A,Mk,m1,2020,100\n\
         A,Mk,m1,2021,150\n\
         B,Mk,m2,2020,120\n",
    )
    .unwrap();
    match run.insights.growth {
        GrowthRate::Percent(p) => assert!((p - 15.0).abs() < 1e-9),
        other => panic!("unexpected growth: {other:?}"),
    }
    assert_eq!(run.insights.top_company, "A");
    assert_eq!(run.insights.lines()[0], "Avg. Sales Growth: 15.00% per year.");
}

#[test]
fn single_row_growth_is_not_applicable() {
    let run = run_csv("Company,Manufacturer,Model,Year,Sales\nA,Mk,m1,2020,5\n").unwrap();
    assert_eq!(run.insights.growth, GrowthRate::NotApplicable);
    assert_eq!(run.insights.lines().len(), 5);
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------
#[test]
fn schema_errors_come_before_numeric_checks() {
    let err = run_csv("Company,Manufacturer,Model,Year\nA,Mk,m1,not-a-year\n").unwrap_err();
    assert!(matches!(err, EngineError::Schema { .. }));
}

#[test]
fn normalized_headers_pass_schema() {
    let run = run_csv(" Model ,Company,  Year,Sales ,Manufacturer\nm1,A,2020,5,Mk\n").unwrap();
    assert_eq!(run.records[0].company, "A");
}

#[test]
fn non_numeric_year_is_a_data_type_error() {
    let err = run_csv("Company,Manufacturer,Model,Year,Sales\nA,Mk,m1,twenty,5\n").unwrap_err();
    assert!(matches!(err, EngineError::DataType(_)));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn missing_file_is_reported() {
    let err = run_forecast(std::path::Path::new("does/not/exist.csv"), &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::DataType(ref m) if m.contains("failed to open")));
}
