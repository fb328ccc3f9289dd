//! Structural sanity checks on the configuration.
//!
//! These run once, before any schema is built and before any file is read.
//! The first problem found aborts the run.

use crate::{Conf, ConfigError, DatasetConfig, Result};

/// Checks configuration entries before schemas are built from them.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks a single dataset declaration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPaths`] if no source path is declared
    /// - [`ConfigError::EmptyColumns`] if the type map is empty
    /// - [`ConfigError::BlankSeparator`] if the separator is blank
    /// - [`ConfigError::BlankDateFormat`] if the date format is blank
    pub fn check(config: &DatasetConfig) -> Result<()> {
        if config.path.is_empty() {
            return Err(ConfigError::EmptyPaths);
        }
        if config.validation.is_empty() {
            return Err(ConfigError::EmptyColumns);
        }
        if config.separator.trim().is_empty() {
            return Err(ConfigError::BlankSeparator);
        }
        if config.date_format.trim().is_empty() {
            return Err(ConfigError::BlankDateFormat);
        }
        Ok(())
    }

    /// Checks every dataset declared in the document.
    pub fn check_conf(conf: &Conf) -> Result<()> {
        if conf.conf.is_empty() {
            return Err(ConfigError::EmptyConfiguration);
        }
        conf.conf.iter().try_for_each(Self::check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid() -> DatasetConfig {
        DatasetConfig {
            path: vec!["a.csv".to_string()],
            separator: ",".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            validation: [("id".to_string(), "INTEGER".to_string())].into(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigValidator::check(&valid()).is_ok());
    }

    #[test]
    fn test_empty_paths() {
        let mut config = valid();
        config.path.clear();
        assert_eq!(ConfigValidator::check(&config), Err(ConfigError::EmptyPaths));
    }

    #[test]
    fn test_empty_columns() {
        let mut config = valid();
        config.validation.clear();
        assert_eq!(
            ConfigValidator::check(&config),
            Err(ConfigError::EmptyColumns)
        );
    }

    #[test]
    fn test_blank_separator() {
        let mut config = valid();
        config.separator = " ".to_string();
        assert_eq!(
            ConfigValidator::check(&config),
            Err(ConfigError::BlankSeparator)
        );
    }

    #[test]
    fn test_blank_date_format() {
        let mut config = valid();
        config.date_format = String::new();
        assert_eq!(
            ConfigValidator::check(&config),
            Err(ConfigError::BlankDateFormat)
        );
    }

    #[test]
    fn test_check_conf_reports_first_problem() {
        let mut broken = valid();
        broken.separator.clear();
        let conf = Conf {
            region: None,
            conf: vec![valid(), broken],
        };
        assert_eq!(
            ConfigValidator::check_conf(&conf),
            Err(ConfigError::BlankSeparator)
        );
    }
}
