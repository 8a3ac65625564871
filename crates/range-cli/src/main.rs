//! `logsene-range`: resolve log-search time expressions from the command line.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cli;
mod commands;
mod config;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::commands::ExpressionError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.trace);

    let result = config::resolve_path(cli.config.as_deref()).and_then(|path| match cli.command {
        Command::Resolve(args) => commands::resolve(args, &path),
        Command::Config(cmd) => commands::config(cmd, &path),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<ExpressionError>() {
                Some(ExpressionError(parse)) => {
                    eprintln!("expected: {}", parse.expected());
                    ExitCode::from(2)
                }
                None => ExitCode::FAILURE,
            }
        }
    }
}
