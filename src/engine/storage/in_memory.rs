use std::collections::HashMap;
use std::sync::Mutex;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::engine::storage::area::SettingsStore;

/// In‑memory settings store (no persistence). Counts writes so callers can verify when a
/// store was written to.
#[derive(Default)]
pub struct InMemorySettingsStore {
    map: Mutex<HashMap<String, Value>>,
    writes: Mutex<usize>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given items
    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            map: Mutex::new(items.into_iter().collect()),
            writes: Mutex::new(0),
        }
    }

    /// Number of completed `set` calls
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of everything stored
    pub fn snapshot(&self) -> Map<String, Value> {
        self.map
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let map = self.map.lock().map_err(|_| anyhow!("settings store lock poisoned"))?;
        Ok(keys
            .iter()
            .filter_map(|k| map.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let mut map = self.map.lock().map_err(|_| anyhow!("settings store lock poisoned"))?;
        map.extend(items);

        let mut writes = self.writes.lock().map_err(|_| anyhow!("settings store lock poisoned"))?;
        *writes += 1;
        Ok(())
    }
}
