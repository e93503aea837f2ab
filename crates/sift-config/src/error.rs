//! Error types for sift configuration.

use std::{io, path::PathBuf};

use sift_query::PatternError;
use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A `[[field]]` entry is malformed.
    #[error("invalid field '{label}' in {path}: {reason}")]
    FieldDefinition {
        /// Path to the file defining the field.
        path: PathBuf,
        /// Label of the field (may be empty).
        label: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// A field pattern could not be compiled into a lexical rule.
    #[error("invalid field pattern in {path}: {source}")]
    Pattern {
        /// Path to the file defining the field.
        path: PathBuf,
        /// Underlying pattern error.
        source: PatternError,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
