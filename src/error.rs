//! Error types for rust_proteoviz

use thiserror::Error;

/// Main error type for proteomics analysis operations
#[derive(Error, Debug)]
pub enum ProteoError {
    #[error("Invalid intensity matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("Data shape does not match the group layout: {reason}")]
    DataShape { reason: String },

    #[error("No protein is quantified in all {n_samples} samples; complete-case statistics are impossible")]
    Completeness { n_samples: usize },

    #[error("Cannot correct p-values: {reason}")]
    CorrectionInput { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Rendering failed for {chart}: {reason}")]
    Render { chart: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for proteomics analysis operations
pub type Result<T> = std::result::Result<T, ProteoError>;
