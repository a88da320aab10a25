//! Scoped lock jobs: lock, run, always unlock.

use super::handle::LockHandle;
use super::types::{Blocking, LockMode};
use crate::error::JobError;
use std::path::Path;
use tracing::debug;

/// Run `work` while holding a lock on `path`.
///
/// A fresh [`LockHandle`] is opened for `path` and locked in `mode`. The lock
/// is released before this function returns on every path: when `work`
/// succeeds, when it returns an error, and when it panics (the panic then
/// continues to unwind into the caller).
///
/// # Errors
///
/// * `JobError::Lock` - Opening or locking failed; `work` was never called
/// * `JobError::Work` - `work` returned an error; the lock is already released
pub fn run_with_lock<P, F, R, E>(
    path: P,
    mode: LockMode,
    blocking: impl Into<Blocking>,
    work: F,
) -> Result<R, JobError<E>>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<R, E>,
{
    let mut handle = LockHandle::open(path.as_ref()).map_err(JobError::Lock)?;
    let guard = handle.lock(mode, blocking).map_err(JobError::Lock)?;

    debug!(path = %guard.path().display(), %mode, "running locked job");
    let outcome = work();
    guard.unlock();

    outcome.map_err(JobError::Work)
}

/// Run `work` as the only holder of `path`.
pub fn run_with_exclusive_lock<P, F, R, E>(
    path: P,
    blocking: impl Into<Blocking>,
    work: F,
) -> Result<R, JobError<E>>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<R, E>,
{
    run_with_lock(path, LockMode::Exclusive, blocking, work)
}

/// Run `work` alongside any other shared holders of `path`, but no exclusive one.
pub fn run_with_shared_lock<P, F, R, E>(
    path: P,
    blocking: impl Into<Blocking>,
    work: F,
) -> Result<R, JobError<E>>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<R, E>,
{
    run_with_lock(path, LockMode::Shared, blocking, work)
}
