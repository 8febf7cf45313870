//! Business insights derived from the historical table.
//!
//! Everything here reads the validated `SalesTable` records, never the forecast.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{GrowthRate, InsightSet, SalesRecord};
use crate::error::EngineError;

pub const PRODUCTION_RECOMMENDATION: &str =
    "Increase production of top-selling models to meet demand.";
pub const MARKETING_RECOMMENDATION: &str =
    "Invest in marketing for low-selling models or consider discontinuation.";

/// Compute the insight set for a table.
pub fn summarize(records: &[SalesRecord]) -> Result<InsightSet, EngineError> {
    if records.is_empty() {
        return Err(EngineError::InsufficientData { rows: 0, needed: 1 });
    }

    let sales: Vec<f64> = records.iter().map(|r| r.sales).collect();
    let growth = average_growth(&sales);
    let best_model = top_by_total_sales(records, |r| &r.model).unwrap_or_default();
    let top_company = top_by_total_sales(records, |r| &r.company).unwrap_or_default();

    Ok(InsightSet {
        growth,
        best_model,
        top_company,
        production_recommendation: PRODUCTION_RECOMMENDATION.to_string(),
        marketing_recommendation: MARKETING_RECOMMENDATION.to_string(),
    })
}

/// Mean row-to-row percentage change, in row order.
///
/// A step whose previous value is zero, or whose change overflows to a
/// non-finite value, has no defined percentage change and is skipped. With no
/// defined step at all the result is `NotApplicable`.
pub fn average_growth(sales: &[f64]) -> GrowthRate {
    let mut total = 0.0;
    let mut steps = 0usize;
    for (row, pair) in sales.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if prev == 0.0 {
            debug!(row = row + 1, "skipping growth step from zero sales");
            continue;
        }
        let step = (cur - prev) / prev * 100.0;
        if !step.is_finite() {
            debug!(row = row + 1, "skipping non-finite growth step");
            continue;
        }
        total += step;
        steps += 1;
    }

    if steps == 0 {
        GrowthRate::NotApplicable
    } else {
        GrowthRate::Percent(total / steps as f64)
    }
}

/// Key with the largest summed sales; ties go to the smallest key.
pub fn top_by_total_sales<'a, F>(records: &'a [SalesRecord], key: F) -> Option<String>
where
    F: Fn(&'a SalesRecord) -> &'a String,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(key(r).as_str()).or_insert(0.0) += r.sales;
    }

    let mut best: Option<(&str, f64)> = None;
    for (name, total) in totals {
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((name, total)),
        }
    }
    best.map(|(name, _)| name.to_string())
}

impl std::fmt::Display for GrowthRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthRate::Percent(p) => write!(f, "{p:.2}%"),
            GrowthRate::NotApplicable => write!(f, "not applicable"),
        }
    }
}

impl InsightSet {
    /// Display strings in presentation order: growth, best model, top company,
    /// production recommendation, marketing strategy.
    pub fn lines(&self) -> Vec<String> {
        let growth = match self.growth {
            GrowthRate::Percent(_) => format!("Avg. Sales Growth: {} per year.", self.growth),
            GrowthRate::NotApplicable => {
                "Avg. Sales Growth: not applicable (needs two consecutive rows with non-zero sales).".to_string()
            }
        };
        vec![
            growth,
            format!("Best-selling Model: {}.", self.best_model),
            format!("Top Company: {}.", self.top_company),
            format!("Production Recommendation: {}", self.production_recommendation),
            format!("Strategy: {}", self.marketing_recommendation),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(company: &str, model: &str, year: i32, sales: f64) -> SalesRecord {
        SalesRecord {
            company: company.to_string(),
            manufacturer: "Mk".to_string(),
            model: model.to_string(),
            year,
            sales,
        }
    }

    #[test]
    fn growth_is_mean_of_row_changes() {
        match average_growth(&[100.0, 150.0, 120.0]) {
            GrowthRate::Percent(p) => assert!((p - 15.0).abs() < 1e-9, "{p}"),
            other => panic!("unexpected growth: {other:?}"),
        }
    }

    #[test]
    fn growth_follows_row_order_not_year_order() {
        // Years are descending here; the changes are still taken row to row.
        let g = average_growth(&[200.0, 100.0]);
        assert_eq!(g, GrowthRate::Percent(-50.0));
    }

    #[test]
    fn single_row_growth_is_not_applicable() {
        assert_eq!(average_growth(&[42.0]), GrowthRate::NotApplicable);
        assert_eq!(average_growth(&[]), GrowthRate::NotApplicable);
    }

    #[test]
    fn growth_from_zero_is_skipped() {
        assert_eq!(average_growth(&[0.0, 10.0]), GrowthRate::NotApplicable);
        assert_eq!(average_growth(&[0.0, 10.0, 20.0]), GrowthRate::Percent(100.0));
    }

    #[test]
    fn overflowing_growth_step_is_skipped() {
        assert_eq!(average_growth(&[1e-300, 1e10]), GrowthRate::NotApplicable);
        assert_eq!(average_growth(&[1e-300, 1e10, 2e10]), GrowthRate::Percent(100.0));
    }

    #[test]
    fn top_keys_use_summed_sales() {
        let records = vec![
            rec("A", "m1", 2020, 10.0),
            rec("A", "m1", 2021, 50.0),
            rec("B", "m2", 2020, 40.0),
        ];
        let insights = summarize(&records).unwrap();
        assert_eq!(insights.top_company, "A");
        assert_eq!(insights.best_model, "m1");
    }

    #[test]
    fn summed_sales_beat_single_largest_row() {
        let records = vec![
            rec("A", "m1", 2020, 30.0),
            rec("A", "m1", 2021, 30.0),
            rec("B", "m2", 2020, 50.0),
        ];
        assert_eq!(top_by_total_sales(&records, |r| &r.company).as_deref(), Some("A"));
    }

    #[test]
    fn ties_resolve_to_smallest_key() {
        let records = vec![rec("Zeta", "z", 2020, 5.0), rec("Alpha", "a", 2020, 5.0)];
        assert_eq!(top_by_total_sales(&records, |r| &r.company).as_deref(), Some("Alpha"));
    }

    #[test]
    fn lines_have_fixed_order_and_format() {
        let records = vec![
            rec("A", "m1", 2020, 100.0),
            rec("A", "m1", 2021, 150.0),
            rec("B", "m2", 2022, 120.0),
        ];
        let lines = summarize(&records).unwrap().lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Avg. Sales Growth: 15.00% per year.");
        assert_eq!(lines[1], "Best-selling Model: m1.");
        assert_eq!(lines[2], "Top Company: A.");
        assert!(lines[3].starts_with("Production Recommendation:"));
        assert!(lines[4].starts_with("Strategy:"));
    }

    #[test]
    fn single_row_table_still_yields_five_lines() {
        let lines = summarize(&[rec("A", "m1", 2020, 10.0)]).unwrap().lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("not applicable"));
        assert!(!lines[0].contains("NaN"));
    }

    #[test]
    fn empty_table_is_insufficient() {
        assert_eq!(
            summarize(&[]).unwrap_err(),
            EngineError::InsufficientData { rows: 0, needed: 1 }
        );
    }
}
