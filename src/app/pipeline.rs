//! The end-to-end analysis pipeline.
//!
//! load -> validate -> aggregate -> descriptive artifacts -> forecast ->
//! forecast artifacts
//!
//! Descriptive artifacts are written before forecasting, so a dataset that is
//! too short to forecast still leaves its trend charts and tables on disk.

use crate::aggregate::Aggregates;
use crate::domain::{ForecastResult, PipelineConfig};
use crate::error::WasteError;
use crate::forecast::forecast_weekly;
use crate::io::ingest::{IngestedData, load_observations};
use crate::report::{Artifacts, write_descriptive_artifacts, write_forecast_artifacts};

/// All computed outputs of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub aggregates: Aggregates,
    pub forecast: ForecastResult,
    pub artifacts: Artifacts,
}

/// Execute the full pipeline described by `config`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunOutput, WasteError> {
    config.validate()?;

    let ingest = load_observations(&config.input_path)?;
    let aggregates = Aggregates::compute(&ingest.observations, config.week_anchor);
    log::info!(
        "Aggregated {} days into {} weeks ({} areas, {} types)",
        aggregates.daily.len(),
        aggregates.weekly.len(),
        aggregates.by_area.len(),
        aggregates.by_type.len()
    );

    let mut artifacts = write_descriptive_artifacts(config, &aggregates)?;

    let forecast = forecast_weekly(&aggregates.weekly, config).inspect_err(|e| {
        log::warn!("Forecast skipped, descriptive outputs were kept: {e}");
    })?;

    artifacts.extend(write_forecast_artifacts(config, &forecast)?);

    Ok(RunOutput {
        ingest,
        aggregates,
        forecast,
        artifacts,
    })
}
