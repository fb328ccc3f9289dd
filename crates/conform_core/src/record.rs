//! Reported (non-fatal) validation violations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxonomy of reported violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Header row has a different number of cells than the schema has columns
    HeaderCountMismatch,
    /// A declared column is absent from the header row
    MissingHeader,
    /// Value is not a base-10 integer
    NotInteger,
    /// Value is not a floating point number
    NotFloat,
    /// Value does not match the date layout
    NotDate,
    /// Value is blank or not valid UTF-8
    NotString,
}

impl ErrorKind {
    /// Returns true for violations that concern the whole dataset rather than a row.
    pub fn is_header_level(&self) -> bool {
        matches!(self, ErrorKind::HeaderCountMismatch | ErrorKind::MissingHeader)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::HeaderCountMismatch => "header row has a different length",
            ErrorKind::MissingHeader => "missing header",
            ErrorKind::NotInteger => "not an INTEGER",
            ErrorKind::NotFloat => "not a FLOAT",
            ErrorKind::NotDate => "not a valid DATE",
            ErrorKind::NotString => "not a valid STRING",
        };
        f.write_str(text)
    }
}

/// A single reported violation.
///
/// Records are created by the validator in discovery order and never modified
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// 0-based index of the row in the dataset (0 for header-level errors)
    pub row_index: usize,

    /// Offending row re-joined with the dataset separator, cells quoted as needed (empty for header-level errors)
    pub raw_row: String,

    /// Kind of violation
    pub kind: ErrorKind,

    /// Column involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    /// Diagnostic text, e.g. the offending value or the date parse failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorRecord {
    /// Creates a dataset-wide record.
    pub fn header(kind: ErrorKind, field_name: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            row_index: 0,
            raw_row: String::new(),
            kind,
            field_name,
            detail: Some(detail.into()),
        }
    }

    /// Creates a record for a field of a data row.
    pub fn field(
        row_index: usize,
        raw_row: impl Into<String>,
        kind: ErrorKind,
        field_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            raw_row: raw_row.into(),
            kind,
            field_name: Some(field_name.into()),
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_header_level() {
            write!(f, "header: {}", self.kind)?;
        } else {
            write!(f, "row {}: {}", self.row_index, self.kind)?;
        }
        if let Some(field) = &self.field_name {
            write!(f, " [{}]", field)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " - {}", detail)?;
        }
        Ok(())
    }
}
