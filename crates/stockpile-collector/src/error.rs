//! Collector error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid batch descriptor: {0}")]
    InvalidMessage(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] stockpile_dataset::DatasetError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] stockpile_telemetry::TelemetryError),

    #[error("Object store error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
