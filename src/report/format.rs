//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting/reconciliation code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::ForecastRun;
use crate::domain::{FitQuality, ForecastRecord, InsightSet, SalesTable, TrendFit};

/// Format the full run summary: preview, insights, trend diagnostics, forecast.
pub fn format_run_summary(run: &ForecastRun, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== salesfc - Sales Forecast ===\n");
    out.push_str(&format!("Input: {source}\n"));
    out.push_str(&format!(
        "Rows: {} | product lines: {} | latest year: {}\n",
        run.table.len(),
        run.product_lines.len(),
        run.max_year
    ));

    out.push_str("\nPreview:\n");
    out.push_str(&format_preview(&run.table));

    out.push_str("\nBusiness insights:\n");
    out.push_str(&format_insights(&run.insights));

    out.push_str("\nTrend:\n");
    out.push_str(&format_trend(&run.fit));

    out.push_str("\nPredicted sales:\n");
    out.push_str(&format_forecast(&run.records));

    out
}

/// Render the preview rows under their normalized headers.
pub fn format_preview(table: &SalesTable) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count().min(20)).collect();
    for row in &table.preview {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count().min(20));
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<w$}", truncate(h, w)))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join(" "));
    out.push('\n');

    for row in &table.preview {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| format!("{:<w$}", truncate(row.get(i).map(String::as_str).unwrap_or(""), w)))
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    out
}

pub fn format_insights(insights: &InsightSet) -> String {
    let mut out = String::new();
    for (i, line) in insights.lines().iter().enumerate() {
        out.push_str(&format!("{}. {line}\n", i + 1));
    }
    out
}

pub fn format_trend(fit: &TrendFit) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "- sales = {:.4} + {:.4} * year\n",
        fit.model.intercept, fit.model.slope
    ));
    out.push_str(&format!("- train  : {}\n", fmt_quality(&fit.train)));
    match &fit.holdout {
        Some(q) => out.push_str(&format!("- holdout: {}\n", fmt_quality(q))),
        None => out.push_str("- holdout: (empty)\n"),
    }
    out
}

/// Format the reconciled forecast table.
pub fn format_forecast(records: &[ForecastRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:<16} {:<16} {:>6} {:>12}",
            "company", "manufacturer", "model", "year", "sales"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:-<16} {:-<16} {:-<16} {:->6} {:->12}\n", "", "", "", "", ""));

    for r in records {
        let (company, manufacturer, model, year, sales) = r.as_tuple();
        out.push_str(&format!(
            "{:<16} {:<16} {:<16} {:>6} {:>12}\n",
            truncate(company, 16),
            truncate(manufacturer, 16),
            truncate(model, 16),
            year,
            sales
        ));
    }

    out
}

fn fmt_quality(q: &FitQuality) -> String {
    let r2 = q.r2.map(|v| format!("{v:.4}")).unwrap_or_else(|| "n/a".to_string());
    format!("n={} SSE={:.3} RMSE={:.3} R2={r2}", q.n, q.sse, q.rmse)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd.");
    }

    #[test]
    fn forecast_table_lists_each_record() {
        let records = vec![ForecastRecord {
            company: "Acme".to_string(),
            manufacturer: "Acme Motors".to_string(),
            model: "Roadster".to_string(),
            year: 2026,
            predicted_sales: 1234,
        }];
        let text = format_forecast(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("company"));
        assert!(lines[2].contains("Roadster"));
        assert!(lines[2].trim_end().ends_with("1234"));
    }

    #[test]
    fn preview_pads_columns() {
        let table = SalesTable {
            headers: vec!["Company".to_string(), "Year".to_string()],
            records: Vec::new(),
            preview: vec![vec!["A".to_string(), "2020".to_string()]],
        };
        let text = format_preview(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Company Year");
        assert_eq!(lines[1], "------- ----");
        assert_eq!(lines[2], "A       2020");
    }
}
