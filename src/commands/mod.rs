//! Command implementations for flockguard.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command returns the process exit code on success;
//! errors are turned into exit codes by `main`.

mod probe;
mod run;

use crate::cli::Command;
use flockguard::error::CliError;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<i32, CliError> {
    match command {
        Command::Probe(args) => probe::cmd_probe(args),
        Command::Run(args) => run::cmd_run(args),
    }
}
