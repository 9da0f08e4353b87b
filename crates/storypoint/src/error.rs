//! Error types for the storypoint library.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::SchemaError;

/// Main error type for storypoint operations.
#[derive(Debug, Error)]
pub enum StorypointError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error or missing required input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The model service answered with a non-success status or an unusable body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request to the model service could not be sent or read.
    #[error("API request failed: {0}")]
    Transport(String),

    /// The historical dataset failed validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type alias for storypoint operations.
pub type Result<T> = std::result::Result<T, StorypointError>;
