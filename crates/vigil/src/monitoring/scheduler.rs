use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;
use uuid::Uuid;

use super::checker::HttpChecker;
use crate::registry::Monitor;
use crate::state::MonitorState;

/// Monitoring scheduler - owns one polling task per live monitor
///
/// Starting an id that already has a task tears the old one down first, so
/// there is never more than one task ticking for a monitor. Stopping is
/// best-effort cancellation: an in-flight probe may still complete, and its
/// late append is absorbed by the history store.
pub struct MonitoringScheduler {
    state: Arc<MonitorState>,
    checker: Arc<HttpChecker>,
    tasks: Mutex<HashMap<Uuid, JoinHandle<()>>>,
}

impl MonitoringScheduler {
    pub fn new(state: Arc<MonitorState>, checker: Arc<HttpChecker>) -> Self {
        Self { state, checker, tasks: Mutex::new(HashMap::new()) }
    }

    /// Start (or restart) the polling task for a monitor.
    ///
    /// The task probes once immediately, then on every interval tick.
    pub async fn start(&self, monitor: &Monitor) {
        let mut tasks = self.tasks.lock().await;

        if let Some(old) = tasks.remove(&monitor.id) {
            debug!("Restarting polling task for monitor {}", monitor.id);
            old.abort();
        }

        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.state),
            Arc::clone(&self.checker),
            monitor.id,
            monitor.url.clone(),
            monitor.interval_ms,
        ));
        tasks.insert(monitor.id, handle);
    }

    /// Cancel the polling task for a monitor; no-op if none is running.
    pub async fn stop(&self, id: Uuid) {
        if let Some(handle) = self.tasks.lock().await.remove(&id) {
            debug!("Stopped polling task for monitor {id}");
            handle.abort();
        }
    }

    /// Cancel every polling task (process shutdown).
    pub async fn stop_all(&self) {
        let mut tasks = self.tasks.lock().await;
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    /// Number of live polling tasks.
    pub async fn task_count(&self) -> usize {
        self.tasks.lock().await.len()
    }
}

/// One monitor's probe loop.
///
/// The interval's first tick completes immediately, which is the eager probe
/// on start; probing inline keeps a monitor's ticks strictly serialized. A
/// tick that comes due while a slow probe is still outstanding is delayed,
/// never run concurrently.
async fn poll_loop(
    state: Arc<MonitorState>,
    checker: Arc<HttpChecker>,
    id: Uuid,
    url: String,
    interval_ms: u64,
) {
    let mut timer = interval(Duration::from_millis(interval_ms));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;

        let result = checker.check(&url).await;
        state.record_result(id, result).await;
    }
}
