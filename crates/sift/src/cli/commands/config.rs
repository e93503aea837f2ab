//! Implementation of `sift config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Prints the contributing files and each field's origin, then the effective
/// field patterns as TOML.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("# no config files found");
    }
    for source in &config.sources {
        println!("# {}", source.display());
    }

    if config.fields.is_empty() {
        println!("# no field patterns configured");
        return ExitCode::SUCCESS;
    }

    println!("#");
    for field in &config.fields {
        let scope = if field.is_global { "global" } else { "local" };
        println!("# {} ({scope}) -> {}", field.label, field.path.display());
    }
    println!();
    print!("{}", config.to_toml());
    ExitCode::SUCCESS
}
