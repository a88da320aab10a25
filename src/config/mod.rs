//! Configuration for the flockguard binary.
//!
//! Settings come from the command line (parsed by clap in `cli`) and are
//! turned into validated [`ProbeConfig`] and [`RunConfig`] values here before
//! any lock is touched. Logging is configured from the environment through
//! [`LOG_ENV`].

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{ProbeConfig, RunConfig};
pub use types::{DEFAULT_LOG_FILTER, LOG_ENV, parse_duration};
