//! Error types for plotternova.

use thiserror::Error;

/// The main error type for plotting operations.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Error during IO operations (file writing, config reading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON style sheet or colour theme
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid data provided for plotting
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Empty data provided where non-empty data is required
    #[error("Empty data provided")]
    EmptyData,
    /// Output path extension that no backend can write
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    /// Rendering error
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for plotting operations.
pub type PlotResult<T> = Result<T, PlotError>;
