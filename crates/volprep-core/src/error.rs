//! Error types for volprep.

use thiserror::Error;

/// The main error type for volprep operations.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Data size does not match the field dimensions.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A numeric column of the classification table could not be parsed.
    #[error("classification table line {line}: invalid {column} value '{value}'")]
    TableParse {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// A classification table row has too few columns.
    #[error("classification table line {line}: expected {expected} columns, found {found}")]
    MissingColumn {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The classification table source contained no rows.
    #[error("classification table is empty")]
    EmptyTable,

    /// A texture target does not match the field it is written from.
    #[error("texture target mismatch: {0}")]
    TargetMismatch(String),

    /// A configuration value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for volprep operations.
pub type Result<T> = std::result::Result<T, VolumeError>;
