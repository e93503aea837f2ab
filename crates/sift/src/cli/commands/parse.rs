//! Implementation of `sift parse`.

use std::process::ExitCode;

use sift_query::Parser;

use crate::cli::{args::ParseCommand, context::CommandContext, output::render_tree};

/// Parses a query and prints the tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let scanner = match ctx.scanner(&cmd.fields) {
        Ok(scanner) => scanner,
        Err(code) => return code,
    };

    let mut parser = Parser::new(scanner);
    match parser.parse_str(&cmd.query) {
        Ok(tree) => {
            print!("{}", render_tree(&tree, &cmd.render));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
