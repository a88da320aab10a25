//! Flockguard: cross-process advisory file locks.
//!
//! This is the main entry point for the `flockguard` CLI. It sets up logging,
//! parses arguments, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use flockguard::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use flockguard::error::CliError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only command output.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(code) => exit_code(code),
        Err(err) => report(err),
    }
}

fn report(err: CliError) -> ExitCode {
    // Print user-actionable error message to stderr
    eprintln!("Error: {}", err);
    exit_code(err.exit_code())
}
