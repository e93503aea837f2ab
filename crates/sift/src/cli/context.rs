//! Shared context for running CLI commands.

use std::{env, path::PathBuf, process::ExitCode};

use sift_config::{Config, check_label};
use sift_query::{LexicalRule, Scanner, TokenKind};
use tracing::debug;

use super::args::FieldArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init` and `--no-config`, which should work even when an
    /// existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds a scanner from the configuration plus any `-f` fields.
    ///
    /// Command-line fields are tried after configured ones.
    pub fn scanner(&self, args: &FieldArgs) -> Result<Scanner, ExitCode> {
        let mut scanner = self.config.scanner();
        for field in &args.fields {
            if let Err(reason) = check_label(&field.label) {
                eprintln!("error: invalid field '{}': {reason}", field.label);
                return Err(ExitCode::FAILURE);
            }
            let kind = TokenKind::Custom(field.label.clone());
            let rule = LexicalRule::token(kind, &field.token).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            })?;
            debug!(label = %field.label, "registered command-line field");
            scanner.register_rule(rule);
        }
        Ok(scanner)
    }
}

/// Returns the current directory, printing an error on failure.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}
