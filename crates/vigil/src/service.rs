use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::DEFAULT_INTERVAL_MS;
use crate::error::MonitorError;
use crate::monitoring::checker::HttpChecker;
use crate::monitoring::scheduler::MonitoringScheduler;
use crate::monitoring::types::{CheckResult, MonitorStatus};
use crate::persistence::SnapshotFile;
use crate::registry::Monitor;
use crate::state::MonitorState;

/// Create request accepted by the facade.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMonitor {
    pub url: String,
    pub name: Option<String>,
    /// Poll interval in milliseconds; defaults to one minute.
    pub interval_ms: Option<u64>,
}

/// A monitor enriched with its latest check outcome, for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSummary {
    #[serde(flatten)]
    pub monitor: Monitor,
    pub latest_status: MonitorStatus,
    pub latest_response_time: Option<u64>,
    pub last_checked: Option<DateTime<Utc>>,
}

impl MonitorSummary {
    /// Derive the listing row from a monitor and its most recent result.
    fn new(monitor: Monitor, latest: Option<&CheckResult>) -> Self {
        Self {
            latest_status: latest.map_or(MonitorStatus::Pending, |r| r.status),
            latest_response_time: latest.map(|r| r.response_time_ms),
            last_checked: latest.map(|r| r.timestamp),
            monitor,
        }
    }
}

/// A monitor together with its full retained history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorDetail {
    #[serde(flatten)]
    pub monitor: Monitor,
    pub results: Vec<CheckResult>,
}

/// Facade over registry, history, scheduler, and persistence.
///
/// Every mutating operation keeps the four in sync; reads compose registry
/// and history into response shapes.
pub struct MonitorService {
    state: Arc<MonitorState>,
    scheduler: MonitoringScheduler,
}

impl MonitorService {
    pub fn new(
        snapshots: SnapshotFile,
        probe_timeout: Duration,
        persist_probes: bool,
    ) -> Result<Self> {
        let state = Arc::new(MonitorState::new(snapshots, persist_probes));
        let checker = Arc::new(HttpChecker::new(probe_timeout)?);
        let scheduler = MonitoringScheduler::new(Arc::clone(&state), checker);

        Ok(Self { state, scheduler })
    }

    /// Restore persisted monitors and resume polling every one of them.
    ///
    /// Each restored monitor gets a fresh eager probe; prior history is kept
    /// and simply continues accumulating. Returns the number restored.
    pub async fn resume(&self) -> usize {
        let monitors = self.state.restore().await;

        for monitor in &monitors {
            self.scheduler.start(monitor).await;
        }

        monitors.len()
    }

    /// Register a new monitor and start polling it immediately.
    pub async fn create_monitor(&self, request: CreateMonitor) -> Result<Monitor, MonitorError> {
        let interval_ms = request.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS);

        let monitor = {
            let mut registry = self.state.registry.write().await;
            let mut history = self.state.history.write().await;

            let monitor = registry.create(request.url, request.name, interval_ms)?;
            history.insert(monitor.id);
            monitor
        };

        self.scheduler.start(&monitor).await;
        self.state.save().await;

        info!("Created monitor {} for {} every {}ms", monitor.id, monitor.url, monitor.interval_ms);
        Ok(monitor)
    }

    /// Remove a monitor: stop its task, drop its config and history, save.
    pub async fn delete_monitor(&self, id: Uuid) -> Result<(), MonitorError> {
        if !self.state.registry.read().await.contains(id) {
            return Err(MonitorError::NotFound(id));
        }

        self.scheduler.stop(id).await;

        {
            let mut registry = self.state.registry.write().await;
            let mut history = self.state.history.write().await;
            registry.remove(id);
            history.clear(id);
        }

        self.state.save().await;

        info!("Deleted monitor {id}");
        Ok(())
    }

    /// All monitors with their latest status (`pending` before the first
    /// completed check).
    pub async fn list_monitors(&self) -> Vec<MonitorSummary> {
        let registry = self.state.registry.read().await;
        let history = self.state.history.read().await;

        registry
            .list()
            .into_iter()
            .map(|monitor| {
                let latest = history.latest(monitor.id);
                MonitorSummary::new(monitor, latest)
            })
            .collect()
    }

    /// One monitor with its full history.
    pub async fn get_monitor(&self, id: Uuid) -> Result<MonitorDetail, MonitorError> {
        let registry = self.state.registry.read().await;
        let history = self.state.history.read().await;

        let monitor = registry.get(id).ok_or(MonitorError::NotFound(id))?.clone();
        Ok(MonitorDetail { results: history.records(id), monitor })
    }

    /// Graceful shutdown: cancel every polling task, then persist once more.
    pub async fn shutdown(&self) {
        self.scheduler.stop_all().await;
        self.state.save().await;
        info!("Monitor service stopped");
    }

    /// Number of live polling tasks (one per monitor).
    pub async fn active_tasks(&self) -> usize {
        self.scheduler.task_count().await
    }
}
