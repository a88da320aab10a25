//! Validated settings for the `probe` and `run` commands.

use crate::locks::{Blocking, LockMode};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one `probe` run: lock, hold, release, linger.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Coordination file to lock.
    pub path: PathBuf,

    /// Lock mode to request.
    pub mode: LockMode,

    /// Whether to wait for the lock or fail at once.
    pub blocking: Blocking,

    /// How long to hold the lock once acquired.
    pub hold: Duration,

    /// How long to keep the process alive after releasing.
    pub linger: Duration,

    /// Optional NDJSON file receiving one event per milestone.
    pub events: Option<PathBuf>,
}

/// Settings for one `run` invocation: a child command executed under the lock.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Coordination file to lock.
    pub path: PathBuf,

    /// Lock mode to request.
    pub mode: LockMode,

    /// Whether to wait for the lock or fail at once.
    pub blocking: Blocking,

    /// Program to run.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}
