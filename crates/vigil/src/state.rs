use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::history::HistoryStore;
use crate::monitoring::types::CheckResult;
use crate::persistence::{Snapshot, SnapshotFile};
use crate::registry::{Monitor, MonitorRegistry};

/// Shared ownership of the registry and history, plus the snapshot gateway.
///
/// Mutated only by the facade (create/delete) and the scheduler tasks
/// (result appends). Lock order is registry before history; guards are
/// dropped before the snapshot write.
pub struct MonitorState {
    pub(crate) registry: RwLock<MonitorRegistry>,
    pub(crate) history: RwLock<HistoryStore>,
    snapshots: SnapshotFile,
    persist_probes: bool,
}

impl MonitorState {
    pub fn new(snapshots: SnapshotFile, persist_probes: bool) -> Self {
        Self {
            registry: RwLock::new(MonitorRegistry::new()),
            history: RwLock::new(HistoryStore::new()),
            snapshots,
            persist_probes,
        }
    }

    /// Load the persisted snapshot into the stores and return the restored
    /// monitors, so the caller can resume their polling tasks.
    pub async fn restore(&self) -> Vec<Monitor> {
        let snapshot = self.snapshots.load();

        let mut registry = self.registry.write().await;
        let mut history = self.history.write().await;
        registry.restore(snapshot.monitors);
        history.restore(snapshot.history);

        registry.list()
    }

    /// Record one probe outcome.
    ///
    /// The append is a no-op when the monitor was deleted while the probe
    /// was in flight; nothing is persisted in that case.
    pub async fn record_result(&self, id: Uuid, result: CheckResult) {
        let appended = self.history.write().await.append(id, result);

        if appended && self.persist_probes {
            self.save().await;
        }
    }

    /// Persist the current state, logging instead of failing.
    ///
    /// In-memory state stays authoritative; the next mutation tries again.
    pub async fn save(&self) {
        let snapshot = {
            let registry = self.registry.read().await;
            let history = self.history.read().await;
            Snapshot { monitors: registry.snapshot(), history: history.snapshot() }
        };

        if let Err(e) = self.snapshots.save(&snapshot) {
            warn!("Failed to persist monitor state: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_record_result_skips_unknown_monitors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = MonitorState::new(SnapshotFile::new(&path), true);

        state.record_result(Uuid::new_v4(), CheckResult::completed(200, true, 5)).await;

        // Nothing appended, nothing saved.
        assert!(state.history.read().await.snapshot().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_record_result_persists_appends() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("state.json"));
        let state = MonitorState::new(file.clone(), true);

        let monitor = state
            .registry
            .write()
            .await
            .create("https://example.com".into(), None, 60_000)
            .unwrap();
        state.history.write().await.insert(monitor.id);

        state.record_result(monitor.id, CheckResult::completed(200, true, 5)).await;

        let persisted = file.load();
        assert_eq!(persisted.history[&monitor.id].len(), 1);
        assert_eq!(persisted.monitors[&monitor.id].url, "https://example.com");
    }

    #[tokio::test]
    async fn test_probe_persistence_can_be_disabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = MonitorState::new(SnapshotFile::new(&path), false);

        let monitor = state
            .registry
            .write()
            .await
            .create("https://example.com".into(), None, 60_000)
            .unwrap();
        state.history.write().await.insert(monitor.id);

        state.record_result(monitor.id, CheckResult::completed(200, true, 5)).await;

        // Appended in memory, but no file written until an explicit save.
        assert_eq!(state.history.read().await.records(monitor.id).len(), 1);
        assert!(!path.exists());

        state.save().await;
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_restore_returns_monitors() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("state.json"));

        let first = MonitorState::new(file.clone(), true);
        let monitor = first
            .registry
            .write()
            .await
            .create("https://example.com".into(), None, 60_000)
            .unwrap();
        first.history.write().await.insert(monitor.id);
        first.save().await;

        let second = MonitorState::new(file, true);
        let restored = second.restore().await;
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id, monitor.id);
    }
}
