//! Weekly waste forecasting.
//!
//! Responsibilities:
//!
//! - regularize the weekly series onto a fixed calendar grid
//! - enforce the minimum-history precondition
//! - fit Holt's linear trend and project the horizon
//! - locate the projected peak week

pub mod grid;
pub mod holt;
pub mod peak;
pub mod regularize;

pub use holt::{HoltOptions, fit_holt, project};
pub use peak::{future_weeks, locate_peak};
pub use regularize::{RegularSeries, regularize};

use crate::domain::{ForecastPoint, ForecastResult, PipelineConfig, WeeklyTotal};
use crate::error::WasteError;

/// Forecast the weeks following `weekly` with the default fitting options.
pub fn forecast_weekly(weekly: &[WeeklyTotal], config: &PipelineConfig) -> Result<ForecastResult, WasteError> {
    forecast_weekly_with(weekly, config, &HoltOptions::default())
}

/// Forecast the weeks following `weekly`.
pub fn forecast_weekly_with(
    weekly: &[WeeklyTotal],
    config: &PipelineConfig,
    opts: &HoltOptions,
) -> Result<ForecastResult, WasteError> {
    config.validate()?;

    let series = regularize(weekly, config.week_anchor, config.gap_policy);
    if series.len() < config.min_points {
        return Err(WasteError::InsufficientData {
            needed: config.min_points,
            got: series.len(),
        });
    }
    let Some(last_week) = series.last_week() else {
        return Err(WasteError::InsufficientData {
            needed: config.min_points,
            got: 0,
        });
    };

    let model = fit_holt(&series.values, opts)?;
    log::info!(
        "Fitted Holt trend on {} weeks: alpha={:.3} beta={:.3} level={:.2} trend={:.2}/week rmse={:.2}",
        model.n,
        model.alpha,
        model.beta,
        model.level,
        model.trend,
        model.rmse
    );

    let values = project(&model, config.horizon);
    if values.iter().any(|v| !v.is_finite()) {
        return Err(WasteError::ForecastFit("projection produced non-finite values".to_string()));
    }

    let points: Vec<ForecastPoint> = future_weeks(last_week, config.horizon)
        .into_iter()
        .zip(values)
        .map(|(week_start, predicted_weight_kg)| ForecastPoint {
            week_start,
            predicted_weight_kg,
        })
        .collect();

    let peak = locate_peak(&points)
        .ok_or_else(|| WasteError::Config("forecast horizon must be >= 1".to_string()))?;

    Ok(ForecastResult {
        history: series.to_totals(),
        regularization: series.report,
        points,
        peak,
        model,
    })
}
