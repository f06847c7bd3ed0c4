pub mod checker;
/// Monitoring engine module - handles execution of monitoring checks
///
/// This module is responsible for:
/// - Executing HTTP reachability probes
/// - Scheduling the per-monitor probe loops
/// - Recording results into history and persistence
pub mod scheduler;
pub mod types;

pub use checker::HttpChecker;
pub use scheduler::MonitoringScheduler;
pub use types::CheckResult;
