//! CLI argument parsing for flockguard.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use flockguard::config::parse_duration;
use flockguard::locks::{Blocking, LockMode};
use std::path::PathBuf;
use std::time::Duration;

/// Flockguard: cross-process advisory file locks.
///
/// Processes that lock the same coordination file exclude each other
/// (exclusive mode) or share it (shared mode). The lock is advisory and is
/// released by the OS when the holder exits.
#[derive(Parser, Debug)]
#[command(name = "flockguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse arguments from the process command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for flockguard.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lock a file, hold it, release it, and report each step.
    ///
    /// Prints LOCKED_EXCLUSIVE or LOCKED_SHARED once the lock is held,
    /// UNLOCKED after release, or `LOCK_FAILED: <error>` if the lock
    /// could not be taken. Exits 0 on success, 1 on failure.
    Probe(ProbeArgs),

    /// Run a command while holding a lock on a file.
    ///
    /// The lock is released when the command exits. Exits with the
    /// command's exit code, or 1 if the lock could not be taken.
    Run(RunArgs),
}

/// Arguments for the `probe` command.
#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Coordination file to lock (created if absent).
    pub path: PathBuf,

    /// Lock mode: exclusive or shared.
    pub mode: LockMode,

    /// Acquisition policy: blocking or nonblocking.
    pub policy: Blocking,

    /// How long to hold the lock (e.g. 2, 1.5, 250ms, 2s).
    #[arg(value_parser = parse_duration)]
    pub hold: Duration,

    /// How long to stay alive after releasing the lock.
    #[arg(value_parser = parse_duration)]
    pub linger: Option<Duration>,

    /// Also append each milestone as an NDJSON event to this file.
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Coordination file to lock (created if absent).
    pub path: PathBuf,

    /// Take a shared lock instead of an exclusive one.
    #[arg(short, long)]
    pub shared: bool,

    /// Fail at once instead of waiting if the lock is taken.
    #[arg(short, long)]
    pub nonblocking: bool,

    /// Command to run, with its arguments (after `--`).
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Requested lock mode.
    pub fn mode(&self) -> LockMode {
        if self.shared {
            LockMode::Shared
        } else {
            LockMode::Exclusive
        }
    }

    /// Requested acquisition policy.
    pub fn policy(&self) -> Blocking {
        Blocking::from(!self.nonblocking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_probe() {
        let cli = Cli::try_parse_from([
            "flockguard",
            "probe",
            "/tmp/t.lock",
            "exclusive",
            "blocking",
            "2",
        ])
        .unwrap();
        if let Command::Probe(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("/tmp/t.lock"));
            assert_eq!(args.mode, LockMode::Exclusive);
            assert_eq!(args.policy, Blocking::Blocking);
            assert_eq!(args.hold, Duration::from_secs(2));
            assert_eq!(args.linger, None);
            assert_eq!(args.events, None);
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn parse_probe_with_linger_and_events() {
        let cli = Cli::try_parse_from([
            "flockguard",
            "probe",
            "/tmp/t.lock",
            "shared",
            "nonblocking",
            "500ms",
            "1.5",
            "--events",
            "/tmp/events.ndjson",
        ])
        .unwrap();
        if let Command::Probe(args) = cli.command {
            assert_eq!(args.mode, LockMode::Shared);
            assert_eq!(args.policy, Blocking::NonBlocking);
            assert_eq!(args.hold, Duration::from_millis(500));
            assert_eq!(args.linger, Some(Duration::from_millis(1500)));
            assert_eq!(args.events, Some(PathBuf::from("/tmp/events.ndjson")));
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn parse_probe_rejects_unknown_mode() {
        let err = Cli::try_parse_from([
            "flockguard",
            "probe",
            "/tmp/t.lock",
            "sometimes",
            "blocking",
            "1",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("invalid lock mode"));
    }

    #[test]
    fn parse_probe_rejects_bad_duration() {
        let result = Cli::try_parse_from([
            "flockguard",
            "probe",
            "/tmp/t.lock",
            "shared",
            "blocking",
            "forever",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_run_defaults_to_exclusive_blocking() {
        let cli = Cli::try_parse_from(["flockguard", "run", "/tmp/t.lock", "--", "echo", "-n", "hi"])
            .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.mode(), LockMode::Exclusive);
            assert_eq!(args.policy(), Blocking::Blocking);
            assert_eq!(args.command, vec!["echo", "-n", "hi"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_shared_nonblocking() {
        let cli = Cli::try_parse_from([
            "flockguard",
            "run",
            "--shared",
            "--nonblocking",
            "/tmp/t.lock",
            "--",
            "true",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.mode(), LockMode::Shared);
            assert_eq!(args.policy(), Blocking::NonBlocking);
            assert_eq!(args.command, vec!["true"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_requires_command() {
        assert!(Cli::try_parse_from(["flockguard", "run", "/tmp/t.lock"]).is_err());
    }
}
