//! Reporting: charts, summary tables and the console summary.
//!
//! Artifacts come in two groups so the descriptive ones can be written even
//! when forecasting fails:
//!
//! - descriptive: daily/weekly trends and area/type totals
//! - forecast: observed + projected overlay, forecast table, JSON summary

pub mod format;

pub use format::*;

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use crate::aggregate::Aggregates;
use crate::chart::{
    BarChart, FORECAST_COLOR, LineChart, OBSERVED_COLOR, Series, WEEKLY_COLOR, date_to_x, render_bar_chart,
    render_line_chart,
};
use crate::domain::{ForecastResult, PipelineConfig};
use crate::error::WasteError;
use crate::io::export::{
    AREA_TABLE, DAILY_TABLE, FORECAST_SUMMARY, FORECAST_TABLE, TYPE_TABLE, WEEKLY_TABLE, write_category_csv,
    write_daily_csv, write_forecast_csv, write_forecast_json, write_weekly_csv,
};

pub const DAILY_CHART: &str = "daily_trend.svg";
pub const WEEKLY_CHART: &str = "weekly_trend.svg";
pub const AREA_CHART: &str = "by_area.svg";
pub const TYPE_CHART: &str = "by_type.svg";
pub const FORECAST_CHART: &str = "weekly_forecast.svg";

const Y_LABEL: &str = "Total Waste (kg)";

/// Paths written by one reporting step.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub charts: Vec<PathBuf>,
    pub tables: Vec<PathBuf>,
}

impl Artifacts {
    pub fn extend(&mut self, other: Artifacts) {
        self.charts.extend(other.charts);
        self.tables.extend(other.tables);
    }
}

/// Create `dir` (and parents) if needed. Safe to call repeatedly.
pub fn ensure_dir(dir: &Path) -> Result<(), WasteError> {
    create_dir_all(dir)
        .map_err(|e| WasteError::io(format!("Failed to create output directory '{}'", dir.display()), e))
}

/// Render the four descriptive charts and write their tables.
pub fn write_descriptive_artifacts(config: &PipelineConfig, agg: &Aggregates) -> Result<Artifacts, WasteError> {
    ensure_dir(&config.charts_dir)?;
    ensure_dir(&config.tables_dir)?;
    let mut out = Artifacts::default();

    let daily: Vec<(f64, f64)> = agg.daily.iter().map(|d| (date_to_x(d.date), d.weight_kg)).collect();
    let path = config.charts_dir.join(DAILY_CHART);
    render_line_chart(
        &path,
        &LineChart {
            title: "Daily Waste Generation Trend",
            x_label: "Date",
            y_label: Y_LABEL,
            series: vec![Series {
                name: "Daily total",
                points: &daily,
                color: OBSERVED_COLOR,
                markers: true,
            }],
            legend: false,
        },
    )?;
    out.charts.push(path);

    let weekly: Vec<(f64, f64)> = agg
        .weekly
        .iter()
        .map(|w| (date_to_x(w.week_start), w.weight_kg))
        .collect();
    let path = config.charts_dir.join(WEEKLY_CHART);
    render_line_chart(
        &path,
        &LineChart {
            title: "Weekly Waste Generation Trend",
            x_label: "Week Starting",
            y_label: Y_LABEL,
            series: vec![Series {
                name: "Weekly total",
                points: &weekly,
                color: WEEKLY_COLOR,
                markers: true,
            }],
            legend: false,
        },
    )?;
    out.charts.push(path);

    let path = config.charts_dir.join(AREA_CHART);
    render_bar_chart(
        &path,
        &BarChart {
            title: "Waste Quantity by Area",
            y_label: Y_LABEL,
            bars: &agg.by_area,
            color: OBSERVED_COLOR,
        },
    )?;
    out.charts.push(path);

    let path = config.charts_dir.join(TYPE_CHART);
    render_bar_chart(
        &path,
        &BarChart {
            title: "Waste Quantity by Type",
            y_label: Y_LABEL,
            bars: &agg.by_type,
            color: OBSERVED_COLOR,
        },
    )?;
    out.charts.push(path);

    let path = config.tables_dir.join(DAILY_TABLE);
    write_daily_csv(&path, &agg.daily)?;
    out.tables.push(path);

    let path = config.tables_dir.join(WEEKLY_TABLE);
    write_weekly_csv(&path, &agg.weekly)?;
    out.tables.push(path);

    let path = config.tables_dir.join(AREA_TABLE);
    write_category_csv(&path, "Area", &agg.by_area)?;
    out.tables.push(path);

    let path = config.tables_dir.join(TYPE_TABLE);
    write_category_csv(&path, "Type", &agg.by_type)?;
    out.tables.push(path);

    log::info!(
        "Wrote {} charts to '{}' and {} tables to '{}'",
        out.charts.len(),
        config.charts_dir.display(),
        out.tables.len(),
        config.tables_dir.display()
    );
    Ok(out)
}

/// Render the observed + forecast overlay and write the forecast table and
/// JSON summary.
pub fn write_forecast_artifacts(config: &PipelineConfig, forecast: &ForecastResult) -> Result<Artifacts, WasteError> {
    ensure_dir(&config.charts_dir)?;
    ensure_dir(&config.tables_dir)?;
    let mut out = Artifacts::default();

    let observed: Vec<(f64, f64)> = forecast
        .history
        .iter()
        .map(|w| (date_to_x(w.week_start), w.weight_kg))
        .collect();
    let projected: Vec<(f64, f64)> = forecast
        .points
        .iter()
        .map(|p| (date_to_x(p.week_start), p.predicted_weight_kg))
        .collect();

    let title = format!("Weekly Waste Generation: Prediction Next {} Weeks", forecast.points.len());
    let path = config.charts_dir.join(FORECAST_CHART);
    render_line_chart(
        &path,
        &LineChart {
            title: &title,
            x_label: "Week Starting",
            y_label: Y_LABEL,
            series: vec![
                Series {
                    name: "Observed",
                    points: &observed,
                    color: OBSERVED_COLOR,
                    markers: false,
                },
                Series {
                    name: "Forecast",
                    points: &projected,
                    color: FORECAST_COLOR,
                    markers: true,
                },
            ],
            legend: true,
        },
    )?;
    out.charts.push(path);

    let path = config.tables_dir.join(FORECAST_TABLE);
    write_forecast_csv(&path, &forecast.points)?;
    out.tables.push(path);

    let path = config.tables_dir.join(FORECAST_SUMMARY);
    write_forecast_json(&path, forecast)?;
    out.tables.push(path);

    Ok(out)
}
