//! Exit code constants for the flockguard binary.
//!
//! - 0: Success
//! - 1: Failure (lock not acquired, I/O error, child could not be spawned)
//! - 2: Usage error (invalid arguments; clap uses the same code)
//!
//! `run` passes the child's own exit code through when the child ran.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The lock could not be taken, or the work around it failed.
pub const FAILURE: i32 = 1;

/// Invalid arguments or configuration.
pub const USAGE_ERROR: i32 = 2;
