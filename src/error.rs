//! Error types for the pool risk pipeline

use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required key is absent from an event or one of its actions
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A key is present but its value has an unusable type
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Input is not valid JSON
    #[error("Failed to parse JSON input: {0}")]
    Parse(#[from] serde_json::Error),

    /// Scoring was attempted with an untrained or broken model
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Training rows and labels have different lengths
    #[error("Dimension mismatch: {rows} training rows but {labels} labels")]
    DimensionMismatch { rows: usize, labels: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
