use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a monitored URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorStatus {
    Online,
    Offline,
    /// No check has completed yet. Derived for presentation only; a stored
    /// [`CheckResult`] is always online or offline.
    Pending,
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorStatus::Online => write!(f, "online"),
            MonitorStatus::Offline => write!(f, "offline"),
            MonitorStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Result of a single probe against a monitor's URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Status of the check (online/offline)
    pub status: MonitorStatus,

    /// HTTP status code, present only when a response was received
    pub status_code: Option<u16>,

    /// Wall-clock time from issuing the request to settling, in milliseconds
    pub response_time_ms: u64,

    /// Timestamp of probe completion
    pub timestamp: DateTime<Utc>,

    /// Error message, present only when the request could not be completed
    pub error: Option<String>,
}

impl CheckResult {
    /// Record for a request that produced a response.
    ///
    /// `success` is the HTTP client's success predicate (2xx).
    pub fn completed(status_code: u16, success: bool, response_time_ms: u64) -> Self {
        Self {
            status: if success { MonitorStatus::Online } else { MonitorStatus::Offline },
            status_code: Some(status_code),
            response_time_ms,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Record for a request that could not be completed.
    pub fn failed(error: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: MonitorStatus::Offline,
            status_code: None,
            response_time_ms,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}
