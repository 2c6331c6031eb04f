//! Error types for stockpile-core.

use thiserror::Error;

/// Core error types.
///
/// All of these describe bad input records. They are never retried;
/// the whole batch is rejected and surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unsupported label value: {0}")]
    UnsupportedLabel(String),

    #[error("Invalid numeric value for {field}: {value}")]
    InvalidNumeric { field: String, value: String },
}

impl CoreError {
    /// Shorthand for a missing-field error.
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
