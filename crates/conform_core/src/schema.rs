//! Configuration document and validation schemas.
//!
//! The configuration document is deserialized into [`Conf`]; every entry of
//! `conf` becomes one [`ValidationSchema`] after passing the structural
//! checks in [`ConfigValidator`].

use crate::{ConfigError, ConfigValidator, DateLayout, Result, TypeSpec, translate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration document.
///
/// # Example
///
/// ```rust
/// use conform_core::{Conf, DatasetConfig};
///
/// let conf = Conf {
///     region: Some("eu-west-1".to_string()),
///     conf: vec![DatasetConfig {
///         path: vec!["data/pricing.csv".to_string()],
///         separator: ",".to_string(),
///         date_format: "%d/%m/%Y".to_string(),
///         validation: [("Price".to_string(), "FLOAT".to_string())].into(),
///     }],
/// };
///
/// let schemas = conf.schemas().unwrap();
/// assert_eq!(schemas[0].date_layout().as_str(), "%d/%m/%Y");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conf {
    /// Storage region, only meaningful to remote loaders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Declared datasets
    #[serde(default)]
    pub conf: Vec<DatasetConfig>,
}

impl Conf {
    /// Checks every dataset and builds the validation schemas.
    ///
    /// Fails on the first structural problem; no schema is returned in that case.
    pub fn schemas(&self) -> Result<Vec<ValidationSchema>> {
        ConfigValidator::check_conf(self)?;
        self.conf.iter().map(ValidationSchema::from_config).collect()
    }
}

/// Declaration of one dataset as written in the configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Source locations, local paths or `scheme://bucket/key`
    #[serde(default)]
    pub path: Vec<String>,

    /// Field separator
    #[serde(default)]
    pub separator: String,

    /// strftime-style date format
    #[serde(default)]
    pub date_format: String,

    /// Column name to type declaration, e.g. `"INTEGER|NULLABLE"`
    #[serde(default)]
    pub validation: BTreeMap<String, String>,
}

/// Validated, ready-to-use schema for one dataset.
///
/// Instances can only be obtained through [`ValidationSchema::from_config`]
/// (or the [`SchemaBuilder`](crate::SchemaBuilder)), so every schema has passed
/// the structural checks and carries an already translated date layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSchema {
    paths: Vec<String>,
    separator: u8,
    date_layout: DateLayout,
    columns: BTreeMap<String, TypeSpec>,
}

impl ValidationSchema {
    /// Builds a schema from its configuration entry.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: structural problems, an invalid separator, an
    /// unsupported date token or an unparsable type declaration. Column names
    /// are trimmed and must stay non-empty and distinct.
    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        ConfigValidator::check(config)?;

        let separator = parse_separator(&config.separator)?;
        let date_layout = translate(&config.date_format)?;

        let mut columns = BTreeMap::new();
        for (name, spec) in &config.validation {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::BlankColumn);
            }
            if columns.contains_key(name) {
                return Err(ConfigError::DuplicateColumn(name.to_string()));
            }
            columns.insert(name.to_string(), TypeSpec::parse(name, spec)?);
        }

        Ok(Self {
            paths: config.path.clone(),
            separator,
            date_layout,
            columns,
        })
    }

    /// Source locations of the dataset.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Field separator byte.
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Field separator as a character.
    pub fn separator_char(&self) -> char {
        char::from(self.separator)
    }

    /// Translated date layout.
    pub fn date_layout(&self) -> &DateLayout {
        &self.date_layout
    }

    /// Declared columns.
    pub fn columns(&self) -> &BTreeMap<String, TypeSpec> {
        &self.columns
    }

    /// Looks up the declared type of a column.
    pub fn column(&self, name: &str) -> Option<&TypeSpec> {
        self.columns.get(name)
    }
}

impl TryFrom<&DatasetConfig> for ValidationSchema {
    type Error = ConfigError;

    fn try_from(config: &DatasetConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

fn parse_separator(separator: &str) -> Result<u8> {
    let mut chars = separator.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(ConfigError::InvalidSeparator(separator.to_string())),
    }
}
