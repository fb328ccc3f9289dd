//! Error types for schema configuration and file loading.
//!
//! Everything in here is fatal for its scope: a [`ConfigError`] aborts the run
//! before any file is read, a [`LoadError`] skips a single file.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Structural problems found while turning a configuration into schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document declares no datasets
    #[error("configuration declares no datasets")]
    EmptyConfiguration,

    /// A dataset has no source paths
    #[error("empty path list in configuration")]
    EmptyPaths,

    /// A dataset has no column declarations
    #[error("validation map is empty")]
    EmptyColumns,

    /// A column name is empty once trimmed
    #[error("column name not provided")]
    BlankColumn,

    /// Two column names are equal once trimmed
    #[error("column '{0}' is declared more than once")]
    DuplicateColumn(String),

    /// The separator is missing or whitespace only
    #[error("separator not provided")]
    BlankSeparator,

    /// The separator is not a single ASCII character
    #[error("separator '{0}' must be a single ASCII character")]
    InvalidSeparator(String),

    /// The date format is missing or whitespace only
    #[error("date format not provided")]
    BlankDateFormat,

    /// The date format uses a token the translator does not know
    #[error("unsupported date token '%{0}'")]
    UnsupportedDateToken(String),

    /// The translated layout was rejected by the date parser
    #[error("invalid date layout '{layout}': {message}")]
    InvalidDateLayout {
        /// Translated layout
        layout: String,
        /// Parser diagnostic
        message: String,
    },

    /// A column type declaration could not be parsed
    #[error("invalid type '{spec}' for column '{column}'")]
    InvalidTypeSpec {
        /// Column name
        column: String,
        /// Raw type declaration
        spec: String,
    },
}

impl ConfigError {
    /// Creates a new invalid type spec error.
    pub fn invalid_type(column: impl Into<String>, spec: impl Into<String>) -> Self {
        Self::InvalidTypeSpec {
            column: column.into(),
            spec: spec.into(),
        }
    }
}

/// Errors raised by a [`FileLoader`](crate::FileLoader).
#[derive(Error, Debug)]
pub enum LoadError {
    /// Local file is missing or not a regular file
    #[error("file [{0}] does not exist")]
    NotFound(String),

    /// Remote location could not be split into bucket and key
    #[error("invalid remote location '{0}': expected scheme://bucket/key")]
    InvalidLocation(String),

    /// Scheme has no loader compiled in
    #[error("no loader available for scheme '{0}'")]
    UnsupportedScheme(String),

    /// Load was aborted by cancellation
    #[error("load of '{0}' cancelled")]
    Cancelled(String),

    /// Local I/O failure
    #[error("I/O error reading '{path}': {source}")]
    Io {
        /// Path being read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Remote storage failure
    #[error("storage error reading '{path}': {message}")]
    Storage {
        /// Location being read
        path: String,
        /// Backend diagnostic
        message: String,
    },
}

impl LoadError {
    /// Creates a new storage error.
    pub fn storage(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
        }
    }
}
