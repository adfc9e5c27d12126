//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration (`PipelineConfig`, `WeekAnchor`, `GapPolicy`)
//! - validated input rows (`Observation`)
//! - aggregate rows (`DailyTotal`, `WeeklyTotal`, `CategoryTotal`)
//! - forecast outputs (`ForecastResult`, `Peak`, `HoltFit`, etc.)

pub mod types;

pub use types::*;
