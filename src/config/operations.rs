//! Config construction and validation.

use super::model::{ProbeConfig, RunConfig};
use crate::error::CliError;
use crate::locks::{Blocking, LockMode};
use std::path::PathBuf;
use std::time::Duration;

impl ProbeConfig {
    /// Build a probe config.
    ///
    /// The lock path is not checked here: a path that cannot be opened is a
    /// lock failure, reported when the probe runs.
    pub fn new(
        path: PathBuf,
        mode: LockMode,
        blocking: Blocking,
        hold: Duration,
        linger: Option<Duration>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            path,
            mode,
            blocking,
            hold,
            linger: linger.unwrap_or_default(),
            events: None,
        })
    }

    /// Also append milestone events to `events`.
    pub fn with_events(mut self, events: Option<PathBuf>) -> Self {
        self.events = events;
        self
    }
}

impl RunConfig {
    /// Build a run config from the lock path and the command line to execute.
    ///
    /// The first element of `command` is the program, the rest its arguments.
    pub fn new(
        path: PathBuf,
        mode: LockMode,
        blocking: Blocking,
        command: Vec<String>,
    ) -> Result<Self, CliError> {
        let mut command = command.into_iter();
        let program = command
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| CliError::Config("no command given to run".to_string()))?;

        Ok(Self {
            path,
            mode,
            blocking,
            program,
            args: command.collect(),
        })
    }
}
