use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use crate::HISTORY_CAPACITY;
use crate::monitoring::types::CheckResult;

/// Bounded per-monitor check history
///
/// Each monitor owns an ordered sequence of results, oldest first, capped at
/// [`HISTORY_CAPACITY`]. Entries are created and destroyed together with
/// their monitor; appending for an id without an entry is a no-op, which is
/// what makes a probe completing after its monitor was deleted harmless.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: HashMap<Uuid, VecDeque<CheckResult>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history entry for a new monitor.
    pub fn insert(&mut self, id: Uuid) {
        self.entries.entry(id).or_default();
    }

    /// Append a result to a monitor's history, evicting from the front once
    /// the capacity is exceeded. Returns false if the monitor has no entry.
    pub fn append(&mut self, id: Uuid, result: CheckResult) -> bool {
        let Some(results) = self.entries.get_mut(&id) else {
            return false;
        };

        results.push_back(result);
        while results.len() > HISTORY_CAPACITY {
            results.pop_front();
        }

        true
    }

    /// All retained results for a monitor, oldest first. Empty if unknown.
    pub fn records(&self, id: Uuid) -> Vec<CheckResult> {
        self.entries.get(&id).map(|results| results.iter().cloned().collect()).unwrap_or_default()
    }

    /// The most recent result for a monitor, if any check has completed.
    pub fn latest(&self, id: Uuid) -> Option<&CheckResult> {
        self.entries.get(&id).and_then(VecDeque::back)
    }

    /// Drop a monitor's entire history entry (used on delete).
    pub fn clear(&mut self, id: Uuid) {
        self.entries.remove(&id);
    }

    /// Snapshot of every entry, for persistence.
    pub fn snapshot(&self) -> HashMap<Uuid, Vec<CheckResult>> {
        self.entries
            .iter()
            .map(|(id, results)| (*id, results.iter().cloned().collect()))
            .collect()
    }

    /// Replace all entries from a persisted snapshot, re-applying the
    /// capacity bound to anything oversized on disk.
    pub fn restore(&mut self, entries: HashMap<Uuid, Vec<CheckResult>>) {
        self.entries = entries
            .into_iter()
            .map(|(id, results)| {
                let mut results: VecDeque<CheckResult> = results.into();
                while results.len() > HISTORY_CAPACITY {
                    results.pop_front();
                }
                (id, results)
            })
            .collect();
    }
}
