use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced to facade callers.
///
/// Probe failures are deliberately absent: a failed check is recorded as an
/// offline [`crate::CheckResult`], never raised as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Interval must be between 5000ms (5s) and 3600000ms (1h), got {0}ms")]
    InvalidInterval(u64),
    #[error("Health check not found")]
    NotFound(Uuid),
}
