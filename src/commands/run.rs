//! Implementation of the `flockguard run` command.
//!
//! Runs a child command while this process holds the lock, in the manner of
//! `flock(1)`. The lock file is opened close-on-exec, so the child does not
//! inherit it and the lock is released as soon as the child has exited.

use crate::cli::RunArgs;
use flockguard::config::RunConfig;
use flockguard::error::{CliError, JobError};
use flockguard::exit_codes;
use flockguard::locks::run_with_lock;
use std::process::{Command, ExitStatus};
use tracing::info;

/// Execute the `flockguard run` command.
pub fn cmd_run(args: RunArgs) -> Result<i32, CliError> {
    let mode = args.mode();
    let policy = args.policy();
    let config = RunConfig::new(args.path, mode, policy, args.command)?;
    run(&config)
}

/// Run the configured command under the lock and return its exit code.
fn run(config: &RunConfig) -> Result<i32, CliError> {
    let outcome = run_with_lock(&config.path, config.mode, config.blocking, || {
        info!(program = %config.program, "running command under lock");
        Command::new(&config.program)
            .args(&config.args)
            .status()
            .map_err(|source| CliError::Spawn {
                program: config.program.clone(),
                source,
            })
    });

    match outcome {
        Ok(status) => Ok(status_code(status)),
        Err(JobError::Lock(err)) => Err(err.into()),
        Err(JobError::Work(err)) => Err(err),
    }
}

/// Exit code to report for a finished child.
///
/// A child killed by a signal reports `128 + signal`, like a shell does.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    exit_codes::FAILURE
}
