//! Column type declarations.
//!
//! A column is declared in configuration as `"<BASETYPE>"` or
//! `"<BASETYPE>|NULLABLE"`, e.g. `"INTEGER|NULLABLE"`.

use crate::{ConfigError, Result};
use std::fmt;

const NULLABLE_QUALIFIER: &str = "NULLABLE";

/// The base type a column value must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Non-blank, well-formed UTF-8 text
    String,
    /// Base-10 signed 64-bit integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// Date/time matching the schema's date layout
    Date,
    /// A type this engine does not know; logged and skipped during validation
    Unknown(String),
}

impl BaseType {
    /// Parses a base type name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_uppercase().as_str() {
            "STRING" => BaseType::String,
            "INTEGER" => BaseType::Integer,
            "FLOAT" => BaseType::Float,
            "DATE" => BaseType::Date,
            _ => BaseType::Unknown(name.to_string()),
        }
    }

    /// Returns the canonical configuration name.
    pub fn name(&self) -> &str {
        match self {
            BaseType::String => "STRING",
            BaseType::Integer => "INTEGER",
            BaseType::Float => "FLOAT",
            BaseType::Date => "DATE",
            BaseType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Base type the value must satisfy
    pub base_type: BaseType,

    /// Whether a blank value is always accepted
    pub nullable: bool,
}

impl TypeSpec {
    /// Creates a non-nullable type spec.
    pub fn new(base_type: BaseType) -> Self {
        Self {
            base_type,
            nullable: false,
        }
    }

    /// Creates a nullable type spec.
    pub fn nullable(base_type: BaseType) -> Self {
        Self {
            base_type,
            nullable: true,
        }
    }

    /// Parses a declaration such as `FLOAT` or `INTEGER|NULLABLE`.
    ///
    /// `column` is only used for error reporting.
    pub fn parse(column: &str, spec: &str) -> Result<Self> {
        let mut parts = spec.split('|');
        let base = parts.next().unwrap_or_default();
        if base.trim().is_empty() {
            return Err(ConfigError::invalid_type(column, spec));
        }

        let nullable = match parts.next() {
            None => false,
            Some(qualifier) if qualifier.trim().eq_ignore_ascii_case(NULLABLE_QUALIFIER) => true,
            Some(_) => return Err(ConfigError::invalid_type(column, spec)),
        };
        if parts.next().is_some() {
            return Err(ConfigError::invalid_type(column, spec));
        }

        Ok(Self {
            base_type: BaseType::parse(base),
            nullable,
        })
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}|{}", self.base_type, NULLABLE_QUALIFIER)
        } else {
            write!(f, "{}", self.base_type)
        }
    }
}
