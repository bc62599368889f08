use super::area::SettingsStore;
use super::event::StorageEvent;
use crate::engine::DEFAULT_CHANNEL_CAPACITY;
use crate::settings::{ZoomSetting, MODE_KEY, ZOOM_KEY};
use anyhow::Result;
use serde_json::Map;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::broadcast;

/// A handle for receiving storage change notifications.
pub type Subscription = broadcast::Receiver<StorageEvent>;

#[derive(Debug)]
struct StorageBus {
    tx: broadcast::Sender<StorageEvent>,
}

impl Default for StorageBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl StorageBus {
    fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }
    fn publish(&self, ev: StorageEvent) {
        // broadcast::Sender::send() fails only when there are 0 receivers.
        let _ = self.tx.send(ev);
    }
}

/// Reads and writes the single [`ZoomSetting`] through a [`SettingsStore`].
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    bus: Arc<StorageBus>,
}

impl Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            bus: Arc::new(StorageBus::default()),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// Loads the current setting.
    ///
    /// Missing or malformed values (nothing was installed yet, or the store was edited by
    /// hand) yield the default unlocked setting.
    pub async fn load(&self) -> Result<ZoomSetting> {
        let items = self.store.get(&[MODE_KEY, ZOOM_KEY]).await?;
        match ZoomSetting::from_items(&items) {
            Ok(setting) => Ok(setting),
            Err(e) => {
                log::warn!("Stored zoom setting is unusable ({e}), using defaults");
                Ok(ZoomSetting::default())
            }
        }
    }

    /// Writes the setting. Returns once the store acknowledged the write.
    ///
    /// Only the write can fail the save. Previous values are read for change events only,
    /// if they cannot be read the events carry no old value.
    pub async fn save(&self, setting: &ZoomSetting) -> Result<()> {
        let items = setting.to_items();
        let old = match self.store.get(&[MODE_KEY, ZOOM_KEY]).await {
            Ok(old) => old,
            Err(e) => {
                log::warn!("Cannot read previous zoom setting ({e}), saving anyway");
                Map::new()
            }
        };

        self.store.set(items.clone()).await?;

        for (key, new_value) in items {
            let old_value = old.get(&key).cloned();
            if old_value.as_ref() != Some(&new_value) {
                self.bus.publish(StorageEvent { key, old_value, new_value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ZoomMode;
    use crate::storage::InMemorySettingsStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Store whose reads are broken while writes still work
    struct WriteOnlyStore {
        inner: InMemorySettingsStore,
    }

    #[async_trait]
    impl SettingsStore for WriteOnlyStore {
        async fn get(&self, _keys: &[&str]) -> Result<Map<String, Value>> {
            anyhow::bail!("read broken")
        }

        async fn set(&self, items: Map<String, Value>) -> Result<()> {
            self.inner.set(items).await
        }
    }

    #[tokio::test]
    async fn save_succeeds_when_previous_values_cannot_be_read() {
        let store = Arc::new(WriteOnlyStore { inner: InMemorySettingsStore::new() });
        let svc = SettingsService::new(store.clone());
        let mut rx = svc.subscribe();

        svc.save(&ZoomSetting::unlocked()).await.unwrap();

        assert_eq!(store.inner.write_count(), 1);
        assert_eq!(store.inner.snapshot().get(MODE_KEY), Some(&json!("unlocked")));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.old_value, None);
    }

    #[tokio::test]
    async fn load_defaults_when_nothing_is_stored() {
        let svc = SettingsService::new(Arc::new(InMemorySettingsStore::new()));
        assert_eq!(svc.load().await.unwrap(), ZoomSetting::unlocked());
    }

    #[tokio::test]
    async fn load_defaults_when_stored_values_are_malformed() {
        let mut items = Map::new();
        items.insert(MODE_KEY.into(), json!(42));
        items.insert(ZOOM_KEY.into(), json!(1.5));
        let svc = SettingsService::new(Arc::new(InMemorySettingsStore::with_items(items)));

        assert_eq!(svc.load().await.unwrap(), ZoomSetting::unlocked());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = Arc::new(InMemorySettingsStore::new());
        let svc = SettingsService::new(store.clone());

        svc.save(&ZoomSetting::locked(1.5)).await.unwrap();
        assert_eq!(store.write_count(), 1);

        let loaded = svc.load().await.unwrap();
        assert_eq!(loaded.mode, ZoomMode::Locked);
        assert_eq!(loaded.zoom, 1.5);

        let snap = store.snapshot();
        assert_eq!(snap.get(MODE_KEY), Some(&json!("locked")));
        assert_eq!(snap.get(ZOOM_KEY), Some(&json!(1.5)));
    }

    #[tokio::test]
    async fn save_publishes_only_changed_keys() {
        let svc = SettingsService::new(Arc::new(InMemorySettingsStore::new()));
        let mut rx = svc.subscribe();

        svc.save(&ZoomSetting::locked(1.0)).await.unwrap();
        let mut first = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        first.sort_by(|a, b| a.key.cmp(&b.key));
        assert_eq!(first[0].key, MODE_KEY);
        assert_eq!(first[0].old_value, None);
        assert_eq!(first[0].new_value, json!("locked"));
        assert_eq!(first[1].key, ZOOM_KEY);

        // Only the zoom changes now
        svc.save(&ZoomSetting::locked(2.0)).await.unwrap();
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.key, ZOOM_KEY);
        assert_eq!(ev.old_value, Some(json!(1.0)));
        assert_eq!(ev.new_value, json!(2.0));
        assert!(rx.try_recv().is_err());
    }
}
