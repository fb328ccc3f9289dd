//! Parser for Conform configuration documents (JSON/YAML/TOML formats).
//!
//! This crate turns a configuration file into the strongly-typed [`Conf`]
//! structure and, through [`load_schemas`], into checked validation schemas.
//!
//! # Example
//!
//! ```rust
//! use conform_parser::parse_json;
//!
//! let json = r#"{
//!     "region": "eu-west-1",
//!     "conf": [{
//!         "path": ["s3://exports/pricing.csv"],
//!         "separator": ",",
//!         "date_format": "%d/%m/%Y",
//!         "validation": { "Price": "FLOAT", "Subclass": "INTEGER|NULLABLE" }
//!     }]
//! }"#;
//!
//! let conf = parse_json(json).expect("Failed to parse configuration");
//! assert_eq!(conf.conf[0].validation.len(), 2);
//! ```

use conform_core::{Conf, ConfigError, ValidationSchema};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but describes an invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json, or no extension)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a configuration from a JSON string.
pub fn parse_json(content: &str) -> Result<Conf> {
    let conf: Conf = serde_json::from_str(content)?;
    Ok(conf)
}

/// Parse a configuration from a YAML string.
///
/// # Example
///
/// ```rust
/// use conform_parser::parse_yaml;
///
/// let yaml = r#"
/// conf:
///   - path: [data/pricing.csv]
///     separator: ","
///     date_format: "%Y-%m-%d"
///     validation:
///       Price: FLOAT
/// "#;
///
/// let conf = parse_yaml(yaml).unwrap();
/// assert_eq!(conf.conf[0].path, vec!["data/pricing.csv"]);
/// ```
pub fn parse_yaml(content: &str) -> Result<Conf> {
    let conf: Conf = serde_yaml_ng::from_str(content)?;
    Ok(conf)
}

/// Parse a configuration from a TOML string.
///
/// # Example
///
/// ```rust
/// use conform_parser::parse_toml;
///
/// let toml = r#"
/// region = "eu-west-1"
///
/// [[conf]]
/// path = ["data/pricing.csv"]
/// separator = ";"
/// date_format = "%d/%m/%Y"
///
/// [conf.validation]
/// Price = "FLOAT"
/// "#;
///
/// let conf = parse_toml(toml).unwrap();
/// assert_eq!(conf.conf[0].separator, ";");
/// ```
pub fn parse_toml(content: &str) -> Result<Conf> {
    let conf: Conf = toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(conf)
}

/// Detect the configuration format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` or no extension → `ConfigFormat::Json`
/// * `.yaml`, `.yml` → `ConfigFormat::Yaml`
/// * `.toml` → `ConfigFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return Ok(ConfigFormat::Json);
    };

    match extension.to_lowercase().as_str() {
        "json" => Ok(ConfigFormat::Json),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a configuration from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<Conf> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Json => parse_json(&content),
        ConfigFormat::Yaml => parse_yaml(&content),
        ConfigFormat::Toml => parse_toml(&content),
    }
}

/// Parse a configuration file and build one checked schema per dataset.
///
/// Returns the parsed document alongside the schemas, in declaration order.
pub fn load_schemas(path: &Path) -> Result<(Conf, Vec<ValidationSchema>)> {
    let conf = parse_file(path)?;
    let schemas = conf.schemas()?;
    Ok((conf, schemas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const PRICING_JSON: &str = r#"{
        "region": "eu-west-1",
        "conf": [{
            "path": ["pricing.csv", "s3://exports/pricing_2.csv"],
            "separator": ",",
            "date_format": "%d/%m/%Y",
            "validation": {
                "Channel": "STRING",
                "Class": "INTEGER",
                "Price": "FLOAT",
                "Subclass": "INTEGER|NULLABLE"
            }
        }]
    }"#;

    #[test]
    fn test_parse_json() {
        let conf = parse_json(PRICING_JSON).expect("Failed to parse valid JSON");

        assert_eq!(conf.region, Some("eu-west-1".to_string()));
        assert_eq!(conf.conf.len(), 1);

        let dataset = &conf.conf[0];
        assert_eq!(dataset.path.len(), 2);
        assert_eq!(dataset.separator, ",");
        assert_eq!(dataset.date_format, "%d/%m/%Y");
        assert_eq!(
            dataset.validation.get("Subclass"),
            Some(&"INTEGER|NULLABLE".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_json(r#"{"conf": [ {"path": "#);
        assert!(matches!(result.unwrap_err(), ParserError::JsonError(_)));
    }

    #[test]
    fn test_parse_yaml_multiple_datasets() {
        let yaml = r#"
conf:
  - path: [a.csv]
    separator: ","
    date_format: "%Y-%m-%d"
    validation:
      id: INTEGER
  - path: [b.csv]
    separator: ";"
    date_format: "%d.%m.%y"
    validation:
      name: STRING|NULLABLE
"#;

        let conf = parse_yaml(yaml).expect("Failed to parse YAML");
        assert!(conf.region.is_none());
        assert_eq!(conf.conf.len(), 2);
        assert_eq!(conf.conf[1].separator, ";");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("conf: [unterminated");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("[[[invalid syntax");
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("conf.json")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(detect_format(Path::new("conf")).unwrap(), ConfigFormat::Json);
        assert_eq!(
            detect_format(Path::new("conf.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("conf.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            detect_format(Path::new("conf.ini")).unwrap_err(),
            ParserError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_load_schemas_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(PRICING_JSON.as_bytes()).unwrap();

        let (conf, schemas) = load_schemas(file.path()).expect("Failed to load schemas");
        assert_eq!(conf.conf.len(), 1);
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].columns().len(), 4);
        assert_eq!(schemas[0].paths()[1], "s3://exports/pricing_2.csv");
    }

    #[test]
    fn test_load_schemas_rejects_invalid_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"conf": [{"path": [], "separator": ",", "date_format": "%Y", "validation": {"a": "STRING"}}]}"#)
            .unwrap();

        let err = load_schemas(file.path()).unwrap_err();
        assert!(matches!(err, ParserError::Config(ConfigError::EmptyPaths)));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("does-not-exist.json"));
        assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
    }
}
