//! Milestone event log for the flockguard binary.
//!
//! Besides printing milestone tokens on stdout, `probe` can append one event
//! per milestone to an NDJSON file (one JSON object per line). Several probe
//! processes may share the file; every event is written with a single append
//! so lines from different processes do not interleave.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: `locked`, `unlocked` or `lock_failed`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `pid`: Process ID of the writer
//! - `path`: The coordination file
//! - `mode` / `policy`: How the lock was requested
//! - `error`: Failure description, for `lock_failed` only

use crate::error::CliError;
use crate::locks::{Blocking, LockMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lock milestones that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Lock acquired
    Locked,
    /// Lock released
    Unlocked,
    /// Lock could not be acquired
    LockFailed,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Locked => write!(f, "locked"),
            EventAction::Unlocked => write!(f, "unlocked"),
            EventAction::LockFailed => write!(f, "lock_failed"),
        }
    }
}

/// An event record for the milestone log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The milestone reached.
    pub action: EventAction,

    /// The actor (e.g., `user@HOST`).
    pub actor: String,

    /// Process ID of the writer.
    pub pid: u32,

    /// The coordination file.
    pub path: PathBuf,

    /// Requested lock mode.
    pub mode: LockMode,

    /// Requested acquisition policy.
    pub policy: Blocking,

    /// Failure description for `lock_failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Event {
    /// Create a new event stamped with the current time, user, host and PID.
    pub fn new(action: EventAction, path: &Path, mode: LockMode, policy: Blocking) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            pid: std::process::id(),
            path: path.to_path_buf(),
            mode,
            policy,
            error: None,
        }
    }

    /// Attach a failure description.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String, CliError> {
        serde_json::to_string(self)
            .map_err(|e| CliError::Output(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the NDJSON file at `events_file`.
///
/// The file is created if it doesn't exist; its parent directory must exist.
///
/// # Errors
///
/// * `CliError::Output` - Serialization, open, or write failed
pub fn append_event(events_file: &Path, event: &Event) -> Result<(), CliError> {
    let mut line = event.to_ndjson_line()?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(events_file)
        .map_err(|e| {
            CliError::Output(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    // One write per line keeps concurrent appenders from interleaving.
    file.write_all(line.as_bytes()).map_err(|e| {
        CliError::Output(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })
}

/// Read every event from an NDJSON file, in file order.
pub fn read_events(events_file: &Path) -> Result<Vec<Event>, CliError> {
    let content = std::fs::read_to_string(events_file).map_err(|e| {
        CliError::Output(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| CliError::Output(format!("invalid event line '{}': {}", line, e)))
        })
        .collect()
}
