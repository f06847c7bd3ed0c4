//! Vigil - URL health-check monitoring service
//!
//! This library provides the monitoring core: a registry of polled URLs,
//! a per-monitor probe scheduler, bounded result history, and snapshot
//! persistence across restarts.

pub mod config;
pub mod error;
pub mod history;
pub mod monitoring;
pub mod persistence;
pub mod registry;
pub mod service;
pub mod state;
pub mod validation;

// Re-export main types
pub use error::MonitorError;
pub use monitoring::checker::HttpChecker;
pub use monitoring::scheduler::MonitoringScheduler;
pub use monitoring::types::{CheckResult, MonitorStatus};
pub use registry::Monitor;
pub use service::{CreateMonitor, MonitorDetail, MonitorService, MonitorSummary};

/// Number of check results retained per monitor.
pub const HISTORY_CAPACITY: usize = 50;

/// Default probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Default poll interval in milliseconds when a create request omits one.
pub const DEFAULT_INTERVAL_MS: u64 = 60_000;
