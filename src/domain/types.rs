//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and forecasting
//! - exported to CSV/JSON for dashboards

use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::WasteError;

/// Weekday that starts a calendar week.
///
/// Every observation is assigned to the anchor day on or before its date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekAnchor {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekAnchor {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekAnchor::Monday => Weekday::Mon,
            WeekAnchor::Tuesday => Weekday::Tue,
            WeekAnchor::Wednesday => Weekday::Wed,
            WeekAnchor::Thursday => Weekday::Thu,
            WeekAnchor::Friday => Weekday::Fri,
            WeekAnchor::Saturday => Weekday::Sat,
            WeekAnchor::Sunday => Weekday::Sun,
        }
    }
}

/// What to do with calendar weeks that have no observations once the weekly
/// series is laid onto a complete grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Missing weeks contribute zero waste.
    #[default]
    Zero,
    /// Linearly interpolate between the neighbouring observed weeks.
    Interpolate,
    /// Keep only observed weeks (the grid is checked but not filled).
    Drop,
}

/// One validated row of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    /// Collected weight in kilograms (finite, `>= 0`).
    pub weight_kg: f64,
    pub area: String,
    pub waste_type: String,
}

/// Total weight collected on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Weight_kg")]
    pub weight_kg: f64,
}

/// Total weight collected in one anchored calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyTotal {
    #[serde(rename = "week")]
    pub week_start: NaiveDate,
    #[serde(rename = "Weight_kg")]
    pub weight_kg: f64,
}

/// Total weight for one category label (an area or a waste type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub weight_kg: f64,
}

/// A single projected week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    #[serde(rename = "week")]
    pub week_start: NaiveDate,
    #[serde(rename = "predicted_weight_kg")]
    pub predicted_weight_kg: f64,
}

/// The projected week with the highest predicted weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Position within the forecast horizon (0-based).
    pub index: usize,
    pub week_start: NaiveDate,
    pub value: f64,
}

/// Fitted Holt parameters and in-sample diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoltFit {
    pub alpha: f64,
    pub beta: f64,
    /// Level after the last observation.
    pub level: f64,
    /// Trend (per week) after the last observation.
    pub trend: f64,
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// How the weekly series was laid onto the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegularizationReport {
    pub policy: GapPolicy,
    /// Weeks that carried observations.
    pub observed_weeks: usize,
    /// Grid weeks with no observations (filled or dropped depending on policy).
    pub missing_weeks: usize,
    /// Points handed to the model.
    pub points: usize,
}

/// Output of the forecasting stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub peak: Peak,
    pub model: HoltFit,
    pub regularization: RegularizationReport,
    /// Regularized history the model was fitted on (`week_start`, weight).
    pub history: Vec<WeeklyTotal>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    /// Directory for chart images (created if absent).
    pub charts_dir: PathBuf,
    /// Directory for the summary tables.
    pub tables_dir: PathBuf,
    /// Number of future weeks to project.
    pub horizon: usize,
    /// Minimum regularized weekly points required to fit the trend model.
    pub min_points: usize,
    pub week_anchor: WeekAnchor,
    pub gap_policy: GapPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("waste_data.csv"),
            charts_dir: PathBuf::from("plots"),
            tables_dir: PathBuf::from("."),
            horizon: 4,
            min_points: 3,
            week_anchor: WeekAnchor::Monday,
            gap_policy: GapPolicy::Zero,
        }
    }
}

impl PipelineConfig {
    /// Reject settings the forecaster cannot honour.
    pub fn validate(&self) -> Result<(), WasteError> {
        if self.horizon == 0 {
            return Err(WasteError::Config("forecast horizon must be >= 1".to_string()));
        }
        // Holt needs two points to initialise a level and a trend.
        if self.min_points < 2 {
            return Err(WasteError::Config(format!(
                "min-points must be >= 2 (got {})",
                self.min_points
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_fixed_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.horizon, 4);
        assert_eq!(config.min_points, 3);
        assert_eq!(config.week_anchor, WeekAnchor::Monday);
        assert_eq!(config.gap_policy, GapPolicy::Zero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_horizon_and_tiny_threshold() {
        let mut config = PipelineConfig::default();
        config.horizon = 0;
        assert!(matches!(config.validate(), Err(WasteError::Config(_))));

        let mut config = PipelineConfig::default();
        config.min_points = 1;
        assert!(matches!(config.validate(), Err(WasteError::Config(_))));
    }

    #[test]
    fn anchor_maps_to_chrono_weekday() {
        assert_eq!(WeekAnchor::Monday.weekday(), Weekday::Mon);
        assert_eq!(WeekAnchor::Sunday.weekday(), Weekday::Sun);
    }
}
