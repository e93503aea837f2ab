//! Clap argument definitions for the `sift` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Parse and inspect search queries")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// An extra field pattern given on the command line as `LABEL=TOKEN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArg {
    /// Token kind label.
    pub label: String,
    /// Bare token pattern.
    pub token: String,
}

/// Parse a `LABEL=TOKEN` field argument.
fn parse_field(s: &str) -> Result<FieldArg, String> {
    let (label, token) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PATTERN, got '{s}'"))?;
    if label.is_empty() || token.is_empty() {
        return Err(format!("expected LABEL=PATTERN, got '{s}'"));
    }
    Ok(FieldArg {
        label: label.to_string(),
        token: token.to_string(),
    })
}

/// Shared flags controlling which field patterns the scanner knows.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Extra field pattern as LABEL=PATTERN, e.g. TRIP='trip:[0-9]+' (can be repeated)
    #[arg(short = 'f', long = "field", value_parser = parse_field)]
    pub fields: Vec<FieldArg>,

    /// Ignore .sift.toml files
    #[arg(long)]
    pub no_config: bool,
}

/// How `sift parse` renders the tree.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Print an indented outline of the tree
    #[arg(long, conflicts_with = "shape")]
    pub tree: bool,

    /// Print the tree in constructor notation
    #[arg(long)]
    pub shape: bool,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    pub query: String,

    /// Field pattern options.
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Rendering options.
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments for `sift tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to scan
    pub query: String,

    /// Field pattern options.
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print the resulting tree
    Parse(ParseCommand),

    /// Print the tokens the scanner produces for a query
    Tokens(TokensCommand),

    /// Initialize a .sift.toml in the current directory
    Init(InitCommand),

    /// Show the effective field patterns
    Config,
}

impl Commands {
    /// Returns true if the command reads `.sift.toml` files.
    pub fn needs_config(&self) -> bool {
        match self {
            Self::Parse(cmd) => !cmd.fields.no_config,
            Self::Tokens(cmd) => !cmd.fields.no_config,
            Self::Init(_) => false,
            Self::Config => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("TRIP=trip:[0-9]+").unwrap(),
            FieldArg {
                label: "TRIP".into(),
                token: "trip:[0-9]+".into(),
            }
        );
        assert_eq!(parse_field("EQ=a=b").unwrap().token, "a=b");
    }

    #[test]
    fn parse_field_rejects_malformed() {
        assert!(parse_field("TRIP").is_err());
        assert!(parse_field("=x").is_err());
        assert!(parse_field("TRIP=").is_err());
    }

    #[test]
    fn no_config_skips_config_loading() {
        let cli = Cli::try_parse_from(["sift", "parse", "--no-config", "rust"]).unwrap();
        assert!(!cli.command.needs_config());

        let cli = Cli::try_parse_from(["sift", "parse", "rust"]).unwrap();
        assert!(cli.command.needs_config());
    }

    #[test]
    fn tree_and_shape_conflict() {
        assert!(Cli::try_parse_from(["sift", "parse", "--tree", "--shape", "rust"]).is_err());
    }
}
