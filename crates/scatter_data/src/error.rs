//! Error types for record sources

use thiserror::Error;

/// Errors that can occur while loading a record source
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing CSV data
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    /// Error parsing JSON data
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The data has the wrong shape
    #[error("Invalid data source: {0}")]
    InvalidDataSource(String),

    /// Invalid path expression for JSON traversal
    #[error("Invalid path expression: {0}")]
    InvalidPath(String),

    /// Empty data source
    #[error("Data source is empty: {0}")]
    EmptyDataSource(String),

    /// Duplicate column names
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for record source operations
pub type Result<T> = std::result::Result<T, DataError>;
