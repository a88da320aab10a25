//! Lock mode and acquisition policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OS-level lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Any number of holders, as long as nobody holds `Exclusive`.
    Shared,
    /// At most one holder across all processes.
    Exclusive,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Shared => "shared",
            LockMode::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(LockMode::Shared),
            "exclusive" => Ok(LockMode::Exclusive),
            other => Err(format!(
                "invalid lock mode '{}': expected 'exclusive' or 'shared'",
                other
            )),
        }
    }
}

/// Acquisition policy: wait for the lock, or fail at once if it is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blocking {
    /// Suspend the calling thread until the OS grants the lock.
    Blocking,
    /// Return immediately with an error if the lock is unavailable.
    NonBlocking,
}

impl Blocking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Blocking::Blocking => "blocking",
            Blocking::NonBlocking => "nonblocking",
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, Blocking::Blocking)
    }
}

impl From<bool> for Blocking {
    fn from(blocking: bool) -> Self {
        if blocking {
            Blocking::Blocking
        } else {
            Blocking::NonBlocking
        }
    }
}

impl fmt::Display for Blocking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Blocking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocking" => Ok(Blocking::Blocking),
            "nonblocking" | "non-blocking" => Ok(Blocking::NonBlocking),
            other => Err(format!(
                "invalid blocking policy '{}': expected 'blocking' or 'nonblocking'",
                other
            )),
        }
    }
}
