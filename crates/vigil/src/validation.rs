use url::Url;

use crate::error::MonitorError;

/// Minimum poll interval (5 seconds).
pub const MIN_INTERVAL_MS: u64 = 5_000;

/// Maximum poll interval (1 hour).
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Validate a monitor URL.
///
/// The URL must be absolute and use a scheme the prober can actually issue a
/// GET against.
pub fn validate_monitor_url(raw: &str) -> Result<Url, MonitorError> {
    let url = Url::parse(raw).map_err(|_| MonitorError::InvalidUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(MonitorError::InvalidUrl(raw.to_string())),
    }
}

/// Validate a poll interval in milliseconds (inclusive bounds).
pub fn validate_poll_interval(interval_ms: u64) -> Result<(), MonitorError> {
    if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
        return Err(MonitorError::InvalidInterval(interval_ms));
    }

    Ok(())
}
