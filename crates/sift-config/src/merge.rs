//! Configuration merging.
//!
//! Merges parsed `.sift.toml` files into a single `Config`, validating each
//! field definition and compiling its pattern.

use std::{collections::HashSet, path::PathBuf};

use sift_query::{LexicalRule, TokenKind};
use tracing::debug;

use crate::{
    Config, ConfigError, FieldPattern, PatternSource,
    discovery::is_global_config,
    parse::{RawConfig, RawField},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Fields keep file order, and files keep precedence order, so the closest
///   file's fields are tried first
/// - A label defined by a closer file shadows the same label further out
/// - Within one file, a repeated label is an error
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut fields = Vec::new();
    let mut seen = HashSet::new();

    for parsed in configs {
        let mut local = HashSet::new();
        for raw in parsed.config.field.iter().flatten() {
            if !local.insert(raw.label.as_str()) {
                return Err(field_error(parsed, raw, "label is defined twice"));
            }
            if seen.contains(&raw.label) {
                debug!(
                    label = %raw.label,
                    path = %parsed.path.display(),
                    "field shadowed by closer config"
                );
                continue;
            }

            let field = compile_field(parsed, raw)?;
            seen.insert(raw.label.clone());
            fields.push(field);
        }
    }

    Ok(Config {
        fields,
        sources: configs.iter().map(|parsed| parsed.path.clone()).collect(),
    })
}

/// Validates a raw field and compiles its pattern.
fn compile_field(parsed: &ParsedConfig, raw: &RawField) -> Result<FieldPattern, ConfigError> {
    check_label(&raw.label).map_err(|reason| field_error(parsed, raw, reason))?;

    let source = match (&raw.token, &raw.pattern) {
        (Some(token), None) => PatternSource::Token(token.clone()),
        (None, Some(pattern)) => PatternSource::Pattern(pattern.clone()),
        (Some(_), Some(_)) => {
            return Err(field_error(parsed, raw, "set only one of 'token' or 'pattern'"));
        }
        (None, None) => {
            return Err(field_error(parsed, raw, "one of 'token' or 'pattern' is required"));
        }
    };

    let kind = TokenKind::Custom(raw.label.clone());
    let rule = match &source {
        PatternSource::Token(token) => LexicalRule::token(kind, token),
        PatternSource::Pattern(pattern) => LexicalRule::new(kind, pattern),
    }
    .map_err(|source| ConfigError::Pattern {
        path: parsed.path.clone(),
        source,
    })?;

    Ok(FieldPattern {
        label: raw.label.clone(),
        source,
        path: parsed.path.clone(),
        is_global: is_global_config(&parsed.path),
        rule,
    })
}

/// Checks that `label` can name a custom token kind.
///
/// Returns the reason on failure. Shared by config files and fields given on
/// the command line.
pub fn check_label(label: &str) -> Result<(), &'static str> {
    if label.trim().is_empty() {
        return Err("label must not be empty");
    }
    if TokenKind::builtin(label).is_some() {
        return Err("label is a built-in token kind");
    }
    Ok(())
}

/// Builds a field definition error for `raw` in `parsed`.
fn field_error(parsed: &ParsedConfig, raw: &RawField, reason: &str) -> ConfigError {
    ConfigError::FieldDefinition {
        path: parsed.path.clone(),
        label: raw.label.clone(),
        reason: reason.to_string(),
    }
}
