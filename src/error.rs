use std::io;
use thiserror::Error;

/// Error type for loading and profiling operations.
#[derive(Error, Debug)]
pub enum FlenserError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no header row.
    #[error("Empty file or no header row to read")]
    EmptyData,

    /// A data row carries more fields than the header declares.
    #[error("Row {row} has {found} fields, but the header declares {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two columns share the same name.
    #[error("Duplicate column name: {0:?}")]
    DuplicateColumn(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A triggered heuristic could not render its output.
    #[error("Heuristic '{heuristic}' failed on column {column:?}: {message}")]
    Heuristic {
        column: String,
        heuristic: &'static str,
        message: String,
    },

    /// Remote fetch failure.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] crate::http::HttpError),
}

/// Result type alias for loading and profiling operations.
pub type Result<T> = std::result::Result<T, FlenserError>;
