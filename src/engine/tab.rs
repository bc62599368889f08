//! Tab system: [`TabId`], [`TabInfo`], [`ChangeInfo`] and the [`TabService`] port.
//!
//! The engine never keeps tab state of its own. It asks the host for the current tabs and
//! commands their zoom through a [`TabService`] on every event.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Display;
use uuid::Uuid;

/// In-memory tab service, used for tests and demos.
pub mod in_memory;

pub use in_memory::InMemoryTabService;

/// A unique identifier for a browser tab.
///
/// Treat `TabId` as an opaque handle. The [`Uuid`] inside is an implementation detail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(Uuid);

impl TabId {
    /// Create a new unique `TabId` using a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the engine knows about a tab: its id and the url it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}

/// Loading status reported in a [`ChangeInfo`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TabStatus {
    Loading,
    Complete,
}

/// Properties of a tab that changed in an update notification. Unchanged properties are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeInfo {
    pub status: Option<TabStatus>,
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Host tab API.
#[async_trait]
pub trait TabService: Send + Sync {
    /// Returns all open tabs, in host order.
    async fn query_all(&self) -> Result<Vec<TabInfo>>;

    /// Sets the zoom factor of a tab. A factor of 0 resets the tab to the host default.
    async fn set_zoom(&self, tab_id: TabId, zoom_factor: f64) -> Result<()>;

    /// Returns the current zoom factor of a tab.
    async fn get_zoom(&self, tab_id: TabId) -> Result<f64>;
}
