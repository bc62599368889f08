//! Badge indicator.
//!
//! The engine shows its state as a short badge text on the extension's action button.
//! See [`ZoomSetting::badge_text`](crate::settings::ZoomSetting::badge_text) for the mapping.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Host badge API.
#[async_trait]
pub trait IndicatorService: Send + Sync {
    /// Replaces the text shown on the badge.
    async fn set_badge_text(&self, text: &str) -> Result<()>;
}

/// In-memory badge. Keeps every text it was given, most recent last.
#[derive(Default)]
pub struct InMemoryIndicator {
    history: Mutex<Vec<String>>,
}

impl InMemoryIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently displayed, if any was ever set
    pub fn text(&self) -> Option<String> {
        self.history().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl IndicatorService for InMemoryIndicator {
    async fn set_badge_text(&self, text: &str) -> Result<()> {
        self.history
            .lock()
            .map_err(|_| anyhow::anyhow!("indicator lock poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}
