use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::MonitorError;
use crate::validation::{validate_monitor_url, validate_poll_interval};

/// Monitor model - a registered URL to be polled
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub interval_ms: u64,
    pub created_at: DateTime<Utc>,
}

/// Registry of monitor configurations
///
/// Owns every [`Monitor`]; mutated only through create and remove. A changed
/// monitor is modeled as delete + create, never updated in place.
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    monitors: HashMap<Uuid, Monitor>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a new monitor, assigning it a fresh id.
    ///
    /// The name defaults to the URL when not supplied.
    pub fn create(
        &mut self,
        url: String,
        name: Option<String>,
        interval_ms: u64,
    ) -> Result<Monitor, MonitorError> {
        validate_monitor_url(&url)?;
        validate_poll_interval(interval_ms)?;

        let monitor = Monitor {
            id: Uuid::new_v4(),
            name: name.unwrap_or_else(|| url.clone()),
            url,
            interval_ms,
            created_at: Utc::now(),
        };

        self.monitors.insert(monitor.id, monitor.clone());
        Ok(monitor)
    }

    pub fn get(&self, id: Uuid) -> Option<&Monitor> {
        self.monitors.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.monitors.contains_key(&id)
    }

    /// Remove a monitor; false if the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        self.monitors.remove(&id).is_some()
    }

    /// All monitors in creation order.
    pub fn list(&self) -> Vec<Monitor> {
        let mut monitors: Vec<Monitor> = self.monitors.values().cloned().collect();
        monitors.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        monitors
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Snapshot of the registry, for persistence.
    pub fn snapshot(&self) -> HashMap<Uuid, Monitor> {
        self.monitors.clone()
    }

    /// Replace all monitors from a persisted snapshot.
    pub fn restore(&mut self, monitors: HashMap<Uuid, Monitor>) {
        self.monitors = monitors;
    }
}
