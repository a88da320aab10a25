//! Locking subsystem for flockguard.
//!
//! Cross-process mutual exclusion through an advisory whole-file lock on a
//! shared coordination file (`flock(2)` on Unix, `LockFileEx` on Windows):
//! - [`LockHandle`]: one open coordination file and its held/not-held state
//! - [`LockGuard`]: releases a handle's lock when it goes out of scope
//! - [`run_with_lock`] and friends: lock, run caller work, always unlock
//!
//! # Coordination Files
//!
//! Any path on a filesystem that supports the OS lock will do. The file is
//! created (mode `0o666` minus umask) if it does not exist, and it is never
//! deleted, read, or written: it is only a rendezvous point. Locks are
//! advisory, so processes that skip this API are not stopped.
//!
//! # Ownership
//!
//! The OS attaches a lock to the open file, and it lives until released or
//! until every descriptor for that open file is closed, including at process
//! exit. A crashed holder therefore never leaves a stale lock behind.
//!
//! # Example
//!
//! ```no_run
//! use flockguard::locks::{run_with_exclusive_lock, Blocking};
//!
//! let total = run_with_exclusive_lock("/tmp/t.lock", Blocking::Blocking, || {
//!     // only one process gets here at a time
//!     Ok::<_, std::io::Error>(42)
//! })?;
//! assert_eq!(total, 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod guard;
mod handle;
mod runner;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use handle::LockHandle;
pub use runner::{run_with_exclusive_lock, run_with_lock, run_with_shared_lock};
pub use types::{Blocking, LockMode};
