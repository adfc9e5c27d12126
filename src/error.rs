//! Error type shared by every pipeline stage.
//!
//! Each variant maps to a process exit code so `main` can stay tiny:
//!
//! - `2`: input problems (schema, configuration, file/CSV/JSON I/O)
//! - `3`: not enough data to forecast
//! - `4`: numerical or rendering failures

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WasteError {
    /// Required input fields are absent. Lists every missing field.
    #[error("Missing required columns in input: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not enough weekly data points for forecasting: got {got}, need at least {needed}.")]
    InsufficientData { needed: usize, got: usize },

    #[error("Forecast model fit failed: {0}")]
    ForecastFit(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write JSON summary '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render chart '{}': {message}", .path.display())]
    Chart { path: PathBuf, message: String },
}

impl WasteError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            WasteError::Schema { .. }
            | WasteError::Config(_)
            | WasteError::Io { .. }
            | WasteError::Csv { .. }
            | WasteError::Json { .. } => 2,
            WasteError::InsufficientData { .. } => 3,
            WasteError::ForecastFit(_) | WasteError::Chart { .. } => 4,
        }
    }
}
