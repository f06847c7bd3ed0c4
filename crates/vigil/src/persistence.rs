use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

use crate::monitoring::types::CheckResult;
use crate::registry::Monitor;

/// Persisted state: monitor configurations plus their check histories.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub monitors: HashMap<Uuid, Monitor>,
    pub history: HashMap<Uuid, Vec<CheckResult>>,
}

/// Snapshot file gateway
///
/// The whole state is one JSON document, fully overwritten on every save.
/// Absent or unreadable state on load is never fatal: monitoring starts
/// from an empty snapshot and the next save rewrites the file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the snapshot file with the given state.
    ///
    /// Writes a sibling temp file first and renames it over the target, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        Ok(())
    }

    /// Read the snapshot file, or the empty snapshot when there is none.
    ///
    /// A corrupt or unreadable file is logged and treated as no prior state.
    pub fn load(&self) -> Snapshot {
        if !self.path.exists() {
            return Snapshot::default();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read snapshot {}: {e}", self.path.display());
                return Snapshot::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "Snapshot {} is unparsable, starting with empty state: {e}",
                    self.path.display()
                );
                Snapshot::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::types::{CheckResult, MonitorStatus};
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_snapshot() -> (Uuid, Snapshot) {
        let id = Uuid::new_v4();
        let monitor = Monitor {
            id,
            url: "https://example.com".into(),
            name: "example".into(),
            interval_ms: 60_000,
            created_at: Utc::now(),
        };

        let results =
            vec![CheckResult::completed(200, true, 12), CheckResult::failed("timeout", 10_000)];

        let snapshot = Snapshot {
            monitors: HashMap::from([(id, monitor)]),
            history: HashMap::from([(id, results)]),
        };

        (id, snapshot)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("state.json"));

        let (id, snapshot) = sample_snapshot();
        file.save(&snapshot).unwrap();

        let loaded = file.load();
        assert_eq!(loaded.monitors.len(), 1);
        assert_eq!(loaded.monitors[&id].url, "https://example.com");
        assert_eq!(loaded.monitors[&id].interval_ms, 60_000);

        let results = &loaded.history[&id];
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, MonitorStatus::Online);
        assert_eq!(results[0].status_code, Some(200));
        assert_eq!(results[1].status, MonitorStatus::Offline);
        assert_eq!(results[1].error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("nested/dir/state.json"));

        let (_, snapshot) = sample_snapshot();
        file.save(&snapshot).unwrap();
        assert_eq!(file.load().monitors.len(), 1);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.json"));

        let snapshot = file.load();
        assert!(snapshot.monitors.is_empty());
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ this is not json").unwrap();

        let snapshot = SnapshotFile::new(&path).load();
        assert!(snapshot.monitors.is_empty());
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("state.json"));

        let (_, first) = sample_snapshot();
        file.save(&first).unwrap();
        file.save(&Snapshot::default()).unwrap();

        assert!(file.load().monitors.is_empty());
    }
}
