//! Implementation of `sift tokens`.

use std::process::ExitCode;

use crate::cli::{args::TokensCommand, context::CommandContext, output::token_line};

/// Prints every token of the query, ending with the END token.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let mut scanner = match ctx.scanner(&cmd.fields) {
        Ok(scanner) => scanner,
        Err(code) => return code,
    };

    for token in scanner.tokenize(&cmd.query) {
        println!("{}", token_line(&token));
    }
    println!("{}", token_line(scanner.last_token()));
    ExitCode::SUCCESS
}
