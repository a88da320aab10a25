//! Configuration constants and value parsers.

use std::time::Duration;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "FLOCKGUARD_LOG";

/// Filter used when [`LOG_ENV`] is unset. Keeps stderr quiet by default.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Parse a duration like `2`, `1.5`, `250ms`, `2s`, `1m` or `1h`.
///
/// Bare numbers are seconds and may be fractional. Negative, non-finite, or
/// overflowing values are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let (number, scale) = if let Some(n) = s.strip_suffix("ms") {
        (n, 0.001)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60.0)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600.0)
    } else {
        (s, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}': expected e.g. 2, 1.5, 250ms, 2s, 1m", s))?;

    Duration::try_from_secs_f64(value * scale)
        .map_err(|e| format!("invalid duration '{}': {}", s, e))
}
