//! Error types for validation operations.
//!
//! Only structural problems are errors here. Type violations are never
//! raised; they are collected as [`ErrorRecord`](conform_core::ErrorRecord)s.

use conform_core::LoadError;
use thiserror::Error;

/// Fatal structural problems that abort the validation of one dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// A row does not have as many fields as the header
    #[error("number of fields mismatch with headers on row {row}: expected {expected}, found {found}")]
    FieldCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl ValidateError {
    /// Creates a new field count mismatch error.
    pub fn field_count(row: usize, expected: usize, found: usize) -> Self {
        Self::FieldCountMismatch {
            row,
            expected,
            found,
        }
    }
}

/// Errors raised while splitting raw bytes into a header and rows.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The content has no header line
    #[error("dataset is empty: no header line found")]
    Empty,

    /// The CSV reader rejected the content
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons a single file of a batch could not be checked.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The content could not be parsed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The content is structurally broken
    #[error(transparent)]
    Structure(#[from] ValidateError),

    /// The blocking validation task panicked or was aborted
    #[error("validation worker failed: {0}")]
    Worker(String),

    /// The reporter could not write the report
    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}
