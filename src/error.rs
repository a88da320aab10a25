//! Error types for flockguard.
//!
//! Uses thiserror for derive macros. Every lock error carries the coordination
//! file's path and, for OS failures, the mapped [`ErrorCode`] together with the
//! original `io::Error` as its source. [`CliError`] covers the binary's own
//! failures and maps each to an exit code.

use crate::errno::ErrorCode;
use crate::exit_codes;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by [`LockHandle`](crate::locks::LockHandle) operations.
#[derive(Error, Debug)]
pub enum FlockError {
    /// The coordination file could not be opened or created.
    #[error("failed to open lock file '{}': {code}", path.display())]
    Open {
        path: PathBuf,
        code: ErrorCode,
        #[source]
        source: io::Error,
    },

    /// The OS refused the lock: contention in non-blocking mode, or any other
    /// failure of the lock call.
    #[error("failed to lock '{}': {code}", path.display())]
    Lock {
        path: PathBuf,
        code: ErrorCode,
        #[source]
        source: io::Error,
    },

    /// The handle already holds a lock. This is a caller bug, not contention.
    #[error("lock '{}' is already held by this handle", path.display())]
    DoubleLock { path: PathBuf },
}

impl FlockError {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        FlockError::Open {
            path: path.to_path_buf(),
            code: ErrorCode::from(&source),
            source,
        }
    }

    pub(crate) fn lock(path: &Path, source: io::Error) -> Self {
        FlockError::Lock {
            path: path.to_path_buf(),
            code: ErrorCode::from(&source),
            source,
        }
    }

    /// The coordination file this error is about.
    pub fn path(&self) -> &Path {
        match self {
            FlockError::Open { path, .. }
            | FlockError::Lock { path, .. }
            | FlockError::DoubleLock { path } => path,
        }
    }

    /// The OS error code, if the error came from the OS.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            FlockError::Open { code, .. } | FlockError::Lock { code, .. } => Some(*code),
            FlockError::DoubleLock { .. } => None,
        }
    }

    /// True when a non-blocking request failed only because another holder
    /// has the lock.
    pub fn is_contended(&self) -> bool {
        match self {
            FlockError::Lock { source, .. } => {
                source.raw_os_error().is_some()
                    && source.raw_os_error() == fs2::lock_contended_error().raw_os_error()
            }
            _ => false,
        }
    }
}

/// Failure of a scoped lock job.
///
/// `Lock` means the work never ran; `Work` means the work ran while the lock
/// was held and failed. In both cases the lock is no longer held when the
/// caller sees the error.
#[derive(Error, Debug)]
pub enum JobError<E> {
    /// Opening or locking the coordination file failed.
    #[error("lock job could not start: {0}")]
    Lock(#[source] FlockError),

    /// The guarded work returned an error.
    #[error("lock job failed: {0}")]
    Work(#[source] E),
}

impl<E> JobError<E> {
    /// True if the work was never invoked.
    pub fn is_lock(&self) -> bool {
        matches!(self, JobError::Lock(_))
    }

    /// True if the work ran and failed.
    pub fn is_work(&self) -> bool {
        matches!(self, JobError::Work(_))
    }

    /// The work's own error, if that is what failed.
    pub fn into_work(self) -> Option<E> {
        match self {
            JobError::Work(e) => Some(e),
            JobError::Lock(_) => None,
        }
    }
}

/// Failures of the `flockguard` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid settings, rejected before any lock is touched.
    #[error("{0}")]
    Config(String),

    /// Opening or locking the coordination file failed.
    #[error(transparent)]
    Lock(#[from] FlockError),

    /// The child command of `run` could not be started or waited on.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Writing a milestone to stdout or the events file failed.
    #[error("{0}")]
    Output(String),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => exit_codes::USAGE_ERROR,
            CliError::Lock(_) | CliError::Spawn { .. } | CliError::Output(_) => {
                exit_codes::FAILURE
            }
        }
    }
}

/// Result type alias for lock handle operations.
pub type Result<T> = std::result::Result<T, FlockError>;
