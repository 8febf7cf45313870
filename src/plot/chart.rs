//! Plotters-powered forecast bar chart.
//!
//! Bars sit at their forecast year, are colored by company and carry a
//! `company` / `sales` annotation. We render through Plotters' SVG backend
//! into an in-memory string, so no font rasterizer or image codec is needed.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::ForecastRecord;
use crate::error::AppError;

/// Chart canvas size in pixels.
pub const CHART_SIZE: (u32, u32) = (1000, 600);

const BACKGROUND: RGBColor = RGBColor(30, 30, 30);
const PANEL: RGBColor = RGBColor(42, 42, 42);
const GRID: RGBColor = RGBColor(128, 128, 128);

/// High-contrast palette, assigned to companies in first-seen order.
const PALETTE: [RGBColor; 6] = [
    RGBColor(255, 0, 255),
    RGBColor(0, 255, 255),
    RGBColor(255, 153, 0),
    RGBColor(51, 255, 0),
    RGBColor(255, 0, 0),
    RGBColor(102, 0, 204),
];

/// Render the chart as an SVG document.
pub fn render_svg(records: &[ForecastRecord]) -> Result<String, AppError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_chart(&root, records).map_err(|e| AppError::new(4, format!("Failed to render chart: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(4, format!("Failed to finish chart: {e}")))?;
    }
    Ok(svg)
}

/// Render the chart as a `data:` URI, ready to embed in HTML.
pub fn render_data_uri(records: &[ForecastRecord]) -> Result<String, AppError> {
    let svg = render_svg(records)?;
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes())))
}

/// Write the SVG chart to a file.
pub fn write_chart_svg(path: &std::path::Path, records: &[ForecastRecord]) -> Result<(), AppError> {
    let svg = render_svg(records)?;
    std::fs::write(path, svg)
        .map_err(|e| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display())))
}

/// Bar geometry for one record: `(x_left, x_right, sales)`.
///
/// Companies sharing a year are dodged side by side inside a 0.8-wide slot.
fn bar_layout(records: &[ForecastRecord]) -> Vec<(f64, f64, i64)> {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for r in records {
        *per_year.entry(r.year).or_insert(0) += 1;
    }

    let mut placed: BTreeMap<i32, usize> = BTreeMap::new();
    records
        .iter()
        .map(|r| {
            let slots = per_year.get(&r.year).copied().unwrap_or(1).max(1) as f64;
            let slot = placed.entry(r.year).or_insert(0);
            let width = 0.8 / slots;
            let left = f64::from(r.year) - 0.4 + width * *slot as f64;
            *slot += 1;
            (left, left + width, r.predicted_sales)
        })
        .collect()
}

fn company_colors(records: &[ForecastRecord]) -> Vec<(String, RGBColor)> {
    let mut out: Vec<(String, RGBColor)> = Vec::new();
    for r in records {
        if !out.iter().any(|(c, _)| c == &r.company) {
            let color = PALETTE[out.len() % PALETTE.len()];
            out.push((r.company.clone(), color));
        }
    }
    out
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    records: &[ForecastRecord],
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    root.fill(&BACKGROUND)?;

    let (x0, x1) = match (
        records.iter().map(|r| r.year).min(),
        records.iter().map(|r| r.year).max(),
    ) {
        (Some(lo), Some(hi)) => (f64::from(lo) - 0.6, f64::from(hi) + 0.6),
        _ => (0.0, 1.0),
    };
    let lo = records.iter().map(|r| r.predicted_sales).min().unwrap_or(0).min(0) as f64;
    let hi = records.iter().map(|r| r.predicted_sales).max().unwrap_or(0).max(0) as f64;
    let pad = ((hi - lo) * 0.15).max(1.0);
    let (y0, y1) = (if lo < 0.0 { lo - pad } else { 0.0 }, hi + pad);

    let white = WHITE;
    let mut chart = ChartBuilder::on(root)
        .caption(
            "Predicted Car Sales for Next 5 Years",
            ("sans-serif", 22).into_font().color(&white),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart.plotting_area().fill(&PANEL)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(GRID.mix(0.7))
        .x_desc("Year")
        .y_desc("Predicted Sales")
        .x_labels(records.len().max(1) + 2)
        .x_label_formatter(&|v| {
            if (v - v.round()).abs() < 1e-6 {
                format!("{:.0}", v)
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format!("{:.0}", v))
        .label_style(("sans-serif", 12).into_font().color(&white))
        .axis_desc_style(("sans-serif", 14).into_font().color(&white))
        .axis_style(white)
        .draw()?;

    let colors = company_colors(records);
    let layout = bar_layout(records);
    let annotation = ("sans-serif", 11)
        .into_font()
        .color(&white)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (company, color) in &colors {
        let bars: Vec<(f64, f64, i64)> = records
            .iter()
            .zip(&layout)
            .filter(|(r, _)| &r.company == company)
            .map(|(_, &bar)| bar)
            .collect();
        let color = *color;

        chart
            .draw_series(
                bars.iter()
                    .map(|&(l, r, sales)| Rectangle::new([(l, 0.0), (r, sales as f64)], color.filled())),
            )?
            .label(company.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

        chart.draw_series(bars.iter().map(|&(l, r, sales)| {
            let top = (sales as f64).max(0.0);
            EmptyElement::at(((l + r) / 2.0, top))
                + Text::new(company.clone(), (0, -16), annotation.clone())
                + Text::new(sales.to_string(), (0, -3), annotation.clone())
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(PANEL)
        .border_style(white)
        .label_font(("sans-serif", 12).into_font().color(&white))
        .draw()?;

    Ok(())
}
