use std::sync::Mutex;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use crate::settings::DEFAULT_ZOOM;
use crate::tab::{TabId, TabInfo, TabService};

/// Zoom factor a tab has when nothing zoomed it
pub const HOST_DEFAULT_ZOOM: f64 = 1.0;

#[derive(Default)]
struct Inner {
    /// Open tabs with their live zoom factor, in opening order
    tabs: Vec<(TabInfo, f64)>,
    /// Every `set_zoom` call as received, including the ones for unknown tabs
    zoom_commands: Vec<(TabId, f64)>,
}

/// In-memory host tab service. Records every zoom command it receives.
#[derive(Default)]
pub struct InMemoryTabService {
    inner: Mutex<Inner>,
}

impl InMemoryTabService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a tab at the host default zoom
    pub fn open_tab(&self, url: impl Into<String>) -> TabInfo {
        let tab = TabInfo::new(TabId::new(), url);
        self.lock().tabs.push((tab.clone(), HOST_DEFAULT_ZOOM));
        tab
    }

    pub fn close_tab(&self, tab_id: TabId) -> bool {
        let mut inner = self.lock();
        let before = inner.tabs.len();
        inner.tabs.retain(|(t, _)| t.id != tab_id);
        inner.tabs.len() != before
    }

    /// Changes the live zoom of a tab without recording a command, like a user zooming with
    /// the keyboard would. Returns the previous zoom.
    pub fn user_zoom(&self, tab_id: TabId, zoom_factor: f64) -> Option<f64> {
        let mut inner = self.lock();
        let (_, zoom) = inner.tabs.iter_mut().find(|(t, _)| t.id == tab_id)?;
        let old = *zoom;
        *zoom = zoom_factor;
        Some(old)
    }

    /// Current live zoom of a tab
    pub fn zoom_of(&self, tab_id: TabId) -> Option<f64> {
        self.lock()
            .tabs
            .iter()
            .find(|(t, _)| t.id == tab_id)
            .map(|(_, z)| *z)
    }

    /// All zoom commands received so far
    pub fn zoom_commands(&self) -> Vec<(TabId, f64)> {
        self.lock().zoom_commands.clone()
    }
}

#[async_trait]
impl TabService for InMemoryTabService {
    async fn query_all(&self) -> Result<Vec<TabInfo>> {
        Ok(self.lock().tabs.iter().map(|(t, _)| t.clone()).collect())
    }

    async fn set_zoom(&self, tab_id: TabId, zoom_factor: f64) -> Result<()> {
        let mut inner = self.lock();
        inner.zoom_commands.push((tab_id, zoom_factor));

        let (_, zoom) = inner
            .tabs
            .iter_mut()
            .find(|(t, _)| t.id == tab_id)
            .ok_or_else(|| anyhow!("no tab with id {tab_id}"))?;

        *zoom = if zoom_factor == DEFAULT_ZOOM { HOST_DEFAULT_ZOOM } else { zoom_factor };
        Ok(())
    }

    async fn get_zoom(&self, tab_id: TabId) -> Result<f64> {
        self.zoom_of(tab_id).ok_or_else(|| anyhow!("no tab with id {tab_id}"))
    }
}
