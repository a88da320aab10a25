//! Implementation of the `flockguard probe` command.
//!
//! A probe takes one lock through the scoped lock runner and reports each
//! milestone on stdout as a single flushed line, so a test harness driving
//! several probe processes can observe contention:
//!
//! - `LOCKED_EXCLUSIVE` / `LOCKED_SHARED`: the lock is held
//! - `UNLOCKED`: the lock has been released
//! - `LOCK_FAILED: <error>`: the lock could not be taken (exit code 1)

use crate::cli::ProbeArgs;
use flockguard::config::ProbeConfig;
use flockguard::error::{CliError, JobError};
use flockguard::events::{Event, EventAction, append_event};
use flockguard::exit_codes;
use flockguard::locks::{LockMode, run_with_lock};
use std::io::{self, Write};
use std::thread;
use tracing::info;

/// Token printed once the lock is held.
fn locked_token(mode: LockMode) -> &'static str {
    match mode {
        LockMode::Exclusive => "LOCKED_EXCLUSIVE",
        LockMode::Shared => "LOCKED_SHARED",
    }
}

const UNLOCKED_TOKEN: &str = "UNLOCKED";
const LOCK_FAILED_TOKEN: &str = "LOCK_FAILED";

/// Execute the `flockguard probe` command.
pub fn cmd_probe(args: ProbeArgs) -> Result<i32, CliError> {
    let config = ProbeConfig::new(args.path, args.mode, args.policy, args.hold, args.linger)?
        .with_events(args.events);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    probe(&config, &mut out)
}

/// Run one probe, writing milestone tokens to `out`.
///
/// Returns the exit code: success, or failure when the lock was refused.
fn probe<W: Write>(config: &ProbeConfig, out: &mut W) -> Result<i32, CliError> {
    let outcome = run_with_lock(&config.path, config.mode, config.blocking, || {
        emit(out, locked_token(config.mode))?;
        record(config, EventAction::Locked, None)?;
        info!(path = %config.path.display(), hold = ?config.hold, "holding lock");
        thread::sleep(config.hold);
        Ok::<_, CliError>(())
    });

    match outcome {
        Ok(()) => {
            emit(out, UNLOCKED_TOKEN)?;
            record(config, EventAction::Unlocked, None)?;
            if !config.linger.is_zero() {
                info!(linger = ?config.linger, "lingering after release");
                thread::sleep(config.linger);
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(JobError::Lock(err)) => {
            emit(out, &format!("{}: {}", LOCK_FAILED_TOKEN, err))?;
            record(config, EventAction::LockFailed, Some(err.to_string()))?;
            Ok(exit_codes::FAILURE)
        }
        Err(JobError::Work(err)) => Err(err),
    }
}

/// Write one milestone line and flush it immediately.
fn emit<W: Write>(out: &mut W, line: &str) -> Result<(), CliError> {
    writeln!(out, "{}", line)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::Output(format!("failed to write '{}' to stdout: {}", line, e)))
}

/// Append a milestone event if an events file was requested.
fn record(config: &ProbeConfig, action: EventAction, error: Option<String>) -> Result<(), CliError> {
    let Some(events_file) = &config.events else {
        return Ok(());
    };

    let mut event = Event::new(action, &config.path, config.mode, config.blocking);
    if let Some(error) = error {
        event = event.with_error(error);
    }
    append_event(events_file, &event)
}
