//! Plotters-powered static charts (SVG).
//!
//! Two chart shapes cover every artifact:
//! - `LineChart`: one or more date-indexed series (trends, forecast overlay)
//! - `BarChart`: category totals, drawn in the order given
//!
//! Chart descriptions are data-driven: series and labels are computed by the
//! caller, so rendering only draws. Dates travel as days since the common era
//! (`f64`) and are formatted back to `YYYY-MM-DD` on the axis.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;

use crate::domain::CategoryTotal;
use crate::error::WasteError;

pub const CHART_SIZE: (u32, u32) = (1000, 500);
pub const BAR_CHART_SIZE: (u32, u32) = (800, 500);

/// Observed-series colour (matplotlib's default blue).
pub const OBSERVED_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Weekly trend colour (dark orange).
pub const WEEKLY_COLOR: RGBColor = RGBColor(255, 140, 0);
pub const FORECAST_COLOR: RGBColor = RGBColor(214, 39, 40);

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// One line on a `LineChart`.
pub struct Series<'a> {
    pub name: &'a str,
    /// `(day number, value)` pairs, see `date_to_x`.
    pub points: &'a [(f64, f64)],
    pub color: RGBColor,
    pub markers: bool,
}

/// A render-only line chart description.
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub series: Vec<Series<'a>>,
    /// Draw a legend box (only useful with more than one series).
    pub legend: bool,
}

/// A render-only bar chart description.
pub struct BarChart<'a> {
    pub title: &'a str,
    pub y_label: &'a str,
    pub bars: &'a [CategoryTotal],
    pub color: RGBColor,
}

/// Map a date onto the numeric x axis.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn fmt_day(v: &f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_kg(v: &f64) -> String {
    format!("{v:.0}")
}

/// Render `chart` to an SVG file at `path`.
pub fn render_line_chart(path: &Path, chart: &LineChart<'_>) -> Result<(), WasteError> {
    draw_line_chart(path, chart).map_err(|e| WasteError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Render `chart` to an SVG file at `path`.
pub fn render_bar_chart(path: &Path, chart: &BarChart<'_>) -> Result<(), WasteError> {
    draw_bar_chart(path, chart).map_err(|e| WasteError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn draw_line_chart(path: &Path, desc: &LineChart<'_>) -> DrawResult {
    let all = || desc.series.iter().flat_map(|s| s.points.iter());
    let (x0, x1) = padded_bounds(all().map(|p| p.0), 0.0, 3.0);
    let (y0, y1) = padded_bounds(all().map(|p| p.1), 0.05, 1.0);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(desc.title, ("sans-serif", 22))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(desc.x_label)
        .y_desc(desc.y_label)
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&fmt_day)
        .y_label_formatter(&fmt_kg)
        .light_line_style(RGBColor(235, 235, 235))
        .draw()?;

    for s in &desc.series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        if s.markers {
            chart.draw_series(
                s.points
                    .iter()
                    .map(move |&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
    }

    if desc.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn draw_bar_chart(path: &Path, desc: &BarChart<'_>) -> DrawResult {
    // An empty table still renders axes over a single empty slot.
    let n = desc.bars.len().max(1);
    let y_max = desc
        .bars
        .iter()
        .map(|c| c.weight_kg)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = SVGBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(desc.title, ("sans-serif", 22))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

    let label_of = |v: &SegmentValue<usize>| -> String {
        match v {
            SegmentValue::CenterOf(i) => desc.bars.get(*i).map(|c| c.label.clone()).unwrap_or_default(),
            _ => String::new(),
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .y_labels(8)
        .x_label_formatter(&label_of)
        .y_label_formatter(&fmt_kg)
        .y_desc(desc.y_label)
        .light_line_style(RGBColor(235, 235, 235))
        .draw()?;

    let color = desc.color;
    chart.draw_series(desc.bars.iter().enumerate().map(|(i, c)| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), c.weight_kg)],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// `(min, max)` of `values` widened by `frac` of the span on each side.
///
/// A flat or empty range is widened by `flat_pad` instead so Plotters always
/// gets `max > min`.
fn padded_bounds(values: impl Iterator<Item = f64>, frac: f64, flat_pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, flat_pad.max(1.0));
    }
    let span = hi - lo;
    if span <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - flat_pad, hi + flat_pad);
    }
    (lo - span * frac, hi + span * frac)
}
