use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Object-safe asynchronous key/value store (the host's local storage area).
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Retrieves the values of the given keys. Keys that are not stored are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Stores all items, overwriting existing values. Returns once every item is written.
    async fn set(&self, items: Map<String, Value>) -> Result<()>;
}
