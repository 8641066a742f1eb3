//! SVG production chart via plotters.
//!
//! One picture: monthly oil and gas totals as lines, with the
//! extracted gap intervals shaded behind them.

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;

use crate::calendar;
use crate::domain::GapAnalysis;
use crate::error::AppError;

const CHART_SIZE: (u32, u32) = (1024, 480);

/// Render the production chart to an SVG file.
pub fn render_svg_chart(
    path: &Path,
    months: &[NaiveDate],
    oil: &[f64],
    gas: &[f64],
    gaps: &GapAnalysis,
) -> Result<(), AppError> {
    if months.is_empty() {
        return Err(AppError::new(2, "Nothing to chart: the timeline is empty."));
    }

    let first = months[0];
    let last = calendar::month_end(months[months.len() - 1]);
    let v_max = oil
        .iter()
        .chain(gas.iter())
        .fold(0.0f64, |acc, &v| acc.max(v))
        .max(1.0)
        * 1.05;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?;

    let title = format!(
        "Total Verified Production {} to {}",
        first.format("%Y-%m"),
        months[months.len() - 1].format("%Y-%m")
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(first..last, 0.0..v_max)
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?;

    chart
        .configure_mesh()
        .x_labels(10)
        .y_desc("volume / month")
        .draw()
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?;

    // Gap shading goes underneath the series.
    chart
        .draw_series(gaps.intervals.iter().map(|i| {
            Rectangle::new([(i.start(), 0.0), (i.end(), v_max)], RED.mix(0.2).filled())
        }))
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?;

    chart
        .draw_series(LineSeries::new(
            months.iter().zip(oil.iter()).map(|(&m, &v)| (m, v)),
            &BLUE,
        ))
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?
        .label("oil")
        .legend(|(x, y)| PathElement::new(vec![(x - 12, y), (x, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            months.iter().zip(gas.iter()).map(|(&m, &v)| (m, v)),
            &GREEN,
        ))
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?
        .label("gas")
        .legend(|(x, y)| PathElement::new(vec![(x - 12, y), (x, y)], GREEN));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| AppError::new(4, format!("Chart rendering failed: {e}")))?;

    root.present()
        .map_err(|e| AppError::new(4, format!("Failed to write chart '{}': {e}", path.display())))?;

    Ok(())
}
