//! Forecast projection: evaluate the trend past the latest observed year.

use crate::domain::{FORECAST_HORIZON, ForecastPoint, TrendModel};
use crate::error::EngineError;

/// Project `FORECAST_HORIZON` consecutive years starting at `max_year + 1`.
///
/// Predictions may be negative or fractional; truncation happens at assembly.
pub fn project(model: &TrendModel, max_year: i32) -> Result<Vec<ForecastPoint>, EngineError> {
    let mut out = Vec::with_capacity(FORECAST_HORIZON);
    for offset in 1..=FORECAST_HORIZON as i32 {
        let year = max_year
            .checked_add(offset)
            .ok_or_else(|| EngineError::data_type(format!("forecast year overflows after {max_year}")))?;
        let predicted_sales = model.predict(year);
        if !predicted_sales.is_finite() {
            return Err(EngineError::data_type(format!(
                "non-finite sales prediction for year {year}"
            )));
        }
        out.push(ForecastPoint { year, predicted_sales });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_consecutive_after_max() {
        let model = TrendModel {
            slope: -2.5,
            intercept: 5_000.0,
        };
        let points = project(&model, 2024).unwrap();
        let years: Vec<i32> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2025, 2026, 2027, 2028, 2029]);
        assert!((points[0].predicted_sales - (5_000.0 - 2.5 * 2025.0)).abs() < 1e-9);
    }

    #[test]
    fn negative_predictions_are_kept() {
        let model = TrendModel {
            slope: -100.0,
            intercept: 0.0,
        };
        let points = project(&model, 1).unwrap();
        assert!(points.iter().all(|p| p.predicted_sales < 0.0));
    }

    #[test]
    fn year_overflow_is_an_error() {
        let model = TrendModel {
            slope: 0.0,
            intercept: 1.0,
        };
        assert!(matches!(project(&model, i32::MAX - 2), Err(EngineError::DataType(_))));
    }
}
