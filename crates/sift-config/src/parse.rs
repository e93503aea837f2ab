//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into `RawConfig` structures that
//! mirror the TOML schema before validation and merging.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Field definitions, in registration order.
    pub field: Option<Vec<RawField>>,
}

/// Raw `[[field]]` entry.
///
/// Exactly one of `token` and `pattern` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawField {
    /// Token kind label, e.g. `TRIP`.
    #[serde(default)]
    pub label: String,
    /// Bare token pattern such as `trip:[0-9]+`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Full two-group pattern: token text, then the rest of the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.field.is_none());
    }

    #[test]
    fn parse_fields_in_order() {
        let toml = r#"
[[field]]
label = "TRIP"
token = "trip:[0-9]+"

[[field]]
label = "EXPERIENCE"
pattern = '(?s)^(experience:[a-z]+)(.*)$'
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let fields = config.field.unwrap();
        assert_eq!(
            fields,
            vec![
                RawField {
                    label: "TRIP".into(),
                    token: Some("trip:[0-9]+".into()),
                    pattern: None,
                },
                RawField {
                    label: "EXPERIENCE".into(),
                    token: None,
                    pattern: Some("(?s)^(experience:[a-z]+)(.*)$".into()),
                },
            ]
        );
    }

    #[test]
    fn parse_root_flag() {
        let config = parse_config("root = true").unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn unknown_field_key_is_rejected() {
        let toml = r#"
[[field]]
label = "TRIP"
regex = "trip:[0-9]+"
"#;
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn invalid_toml_reports_path() {
        let err = parse_config_str("[[field]", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = parse_config_file(Path::new("/nonexistent/.sift.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
