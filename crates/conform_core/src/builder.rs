//! Builder for assembling validation schemas in code.

use crate::{DatasetConfig, Result, ValidationSchema};

/// Builder for creating a [`ValidationSchema`] without a configuration file.
///
/// The builder fills a [`DatasetConfig`] and runs the same checks as
/// configuration loading does, so it cannot produce an unchecked schema.
///
/// # Example
///
/// ```rust
/// use conform_core::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .path("s3://exports/pricing.csv")
///     .separator(',')
///     .date_format("%Y-%m-%d")
///     .column("Price", "FLOAT")
///     .column("Subclass", "INTEGER|NULLABLE")
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.columns().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    config: DatasetConfig,
}

impl SchemaBuilder {
    /// Creates an empty builder with `,` as separator.
    pub fn new() -> Self {
        Self {
            config: DatasetConfig {
                separator: ",".to_string(),
                ..Default::default()
            },
        }
    }

    /// Adds a source location.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path.push(path.into());
        self
    }

    /// Sets the field separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.config.separator = separator.to_string();
        self
    }

    /// Sets the strftime-style date format.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Declares a column, e.g. `.column("Subclass", "INTEGER|NULLABLE")`.
    pub fn column(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.config.validation.insert(name.into(), spec.into());
        self
    }

    /// Builds and checks the schema.
    pub fn build(self) -> Result<ValidationSchema> {
        ValidationSchema::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn test_builder_requires_date_format() {
        let result = SchemaBuilder::new()
            .path("a.csv")
            .column("id", "INTEGER")
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::BlankDateFormat);
    }

    #[test]
    fn test_builder_custom_separator() {
        let schema = SchemaBuilder::new()
            .path("a.csv")
            .separator(';')
            .date_format("%Y")
            .column("id", "INTEGER")
            .build()
            .unwrap();
        assert_eq!(schema.separator(), b';');
    }
}
