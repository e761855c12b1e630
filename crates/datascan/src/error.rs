//! Error types for the datascan library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datascan operations.
#[derive(Debug, Error)]
pub enum DatascanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No non-blank lines (delimited formats) or an empty JSON array.
    #[error("{0}")]
    EmptyFile(String),

    /// JSON parsed but its top-level shape cannot become a table.
    #[error("{0}")]
    InvalidStructure(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File extension outside the supported set.
    #[error("Unsupported file format: {0}. Supported formats: CSV, JSON, TXT, TSV")]
    UnsupportedFormat(String),

    /// Input exceeds the configured size cap.
    #[error("File size exceeds {}MB limit", .limit / (1024 * 1024))]
    FileTooLarge { size: u64, limit: u64 },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for datascan operations.
pub type Result<T> = std::result::Result<T, DatascanError>;
