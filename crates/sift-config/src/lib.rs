//! Configuration system for sift.
//!
//! sift reads TOML files named `.sift.toml` that declare field patterns: extra
//! lexical rules that turn tokens such as `trip:123` into field filters.
//! Configuration is resolved by walking up the directory tree from the current
//! working directory, collecting any `.sift.toml` files found, then loading
//! `~/.sift.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, check_label, merge_configs};
pub use parse::{RawConfig, RawField, parse_config_file, parse_config_str};
use serde::Serialize;
use sift_query::{LexicalRule, Scanner};
pub use templates::local_template;

/// Merged configuration.
///
/// Field patterns are validated and compiled when the configuration is loaded,
/// so building a scanner from it cannot fail.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Field patterns in registration order.
    pub fields: Vec<FieldPattern>,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the compiled field rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &LexicalRule> {
        self.fields.iter().map(|field| &field.rule)
    }

    /// Registers every field rule on `scanner`, after any rules it already has.
    pub fn register(&self, scanner: &mut Scanner) {
        for rule in self.rules() {
            scanner.register_rule(rule.clone());
        }
    }

    /// Builds a scanner with the built-in rules plus every configured field.
    pub fn scanner(&self) -> Scanner {
        let mut scanner = Scanner::new();
        self.register(&mut scanner);
        scanner
    }

    /// Serializes the effective field list to TOML format.
    ///
    /// The output has the same shape as a `.sift.toml` file.
    pub fn to_toml(&self) -> String {
        let serializable = SerializableConfig {
            field: self.fields.iter().map(FieldPattern::to_raw).collect(),
        };
        toml::to_string_pretty(&serializable).expect("field serialization should not fail")
    }
}

/// Internal struct for TOML serialization of the field list.
#[derive(Serialize)]
struct SerializableConfig {
    /// Effective fields in registration order.
    field: Vec<RawField>,
}

/// How a field's pattern was written in the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// A bare token pattern, wrapped into the two-group shape.
    Token(String),
    /// A full two-group pattern.
    Pattern(String),
}

/// A validated field definition.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    /// Token kind label.
    pub label: String,
    /// The pattern as written.
    pub source: PatternSource,
    /// Config file defining this field.
    pub path: PathBuf,
    /// Whether this field was defined in the global `~/.sift.toml`.
    pub is_global: bool,
    /// Compiled lexical rule.
    pub rule: LexicalRule,
}

impl FieldPattern {
    /// Converts back to the raw TOML shape.
    fn to_raw(&self) -> RawField {
        let (token, pattern) = match &self.source {
            PatternSource::Token(token) => (Some(token.clone()), None),
            PatternSource::Pattern(pattern) => (None, Some(pattern.clone())),
        };
        RawField {
            label: self.label.clone(),
            token,
            pattern,
        }
    }
}
