//! Flockguard: cross-process mutual exclusion through advisory file locks.
//!
//! Independent processes coordinate through a shared file path: only one of
//! them may hold an exclusive lock on it, or any number may hold shared locks.
//! The core is [`locks::LockHandle`] and the scoped runners
//! ([`locks::run_with_exclusive_lock`], [`locks::run_with_shared_lock`]) that
//! guarantee the lock is released on every exit path.
//!
//! The remaining modules support the `flockguard` binary, used as a test and
//! diagnostic helper and as a `flock(1)`-style command runner.

pub mod config;
pub mod errno;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod locks;

pub use error::{FlockError, JobError};
pub use locks::{
    Blocking, LockGuard, LockHandle, LockMode, run_with_exclusive_lock, run_with_lock,
    run_with_shared_lock,
};
