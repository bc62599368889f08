//! The persisted zoom setting.
//!
//! Exactly one [`ZoomSetting`] exists for the whole engine. It is stored as two keys in the
//! settings store: [`MODE_KEY`] (`"unlocked"` / `"locked"`) and [`ZOOM_KEY`] (a number).

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Storage key holding the lock mode
pub const MODE_KEY: &str = "mode";
/// Storage key holding the zoom factor
pub const ZOOM_KEY: &str = "zoom";
/// Sentinel zoom factor meaning "use the host default zoom"
pub const DEFAULT_ZOOM: f64 = 0.0;

/// Whether tab zoom is actively enforced.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomMode {
    /// Tabs keep whatever zoom they have
    #[default]
    Unlocked,
    /// Every non-privileged tab is forced to the stored zoom
    Locked,
}

impl Display for ZoomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoomMode::Unlocked => write!(f, "unlocked"),
            ZoomMode::Locked => write!(f, "locked"),
        }
    }
}

/// The `(mode, zoom)` pair shared by all tabs.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ZoomSetting {
    pub mode: ZoomMode,
    /// Zoom factor (1.0 is 100%). [`DEFAULT_ZOOM`] means the host default.
    pub zoom: f64,
}

impl ZoomSetting {
    pub fn new(mode: ZoomMode, zoom: f64) -> Self {
        Self { mode, zoom }
    }

    /// The state right after install: unlocked, host default zoom.
    pub fn unlocked() -> Self {
        Self::new(ZoomMode::Unlocked, DEFAULT_ZOOM)
    }

    pub fn locked(zoom: f64) -> Self {
        Self::new(ZoomMode::Locked, zoom)
    }

    pub fn is_locked(&self) -> bool {
        self.mode == ZoomMode::Locked
    }

    /// Short text for the badge: `off`, `def`, or the zoom as a rounded percentage.
    pub fn badge_text(&self) -> String {
        match self.mode {
            ZoomMode::Unlocked => "off".to_string(),
            ZoomMode::Locked if self.zoom == DEFAULT_ZOOM => "def".to_string(),
            ZoomMode::Locked => format!("{}", (self.zoom * 100.0).round() as i64),
        }
    }

    /// Computes the setting after the user toggles the lock on a tab zoomed to `live_zoom`.
    ///
    /// Locking captures the tab's zoom at that moment. Unlocking keeps the previous zoom
    /// around, it has no effect while unlocked.
    pub fn toggled(&self, live_zoom: f64) -> Self {
        match self.mode {
            ZoomMode::Unlocked => Self::locked(live_zoom),
            ZoomMode::Locked => Self::new(ZoomMode::Unlocked, self.zoom),
        }
    }

    /// Encodes the setting as the two storage items.
    pub fn to_items(&self) -> Map<String, Value> {
        let mut items = Map::new();
        items.insert(MODE_KEY.to_string(), Value::String(self.mode.to_string()));
        items.insert(ZOOM_KEY.to_string(), Value::from(self.zoom));
        items
    }

    /// Decodes the setting from storage items. Fails when a key is missing or malformed.
    pub fn from_items(items: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mode = items.get(MODE_KEY).cloned().unwrap_or(Value::Null);
        let zoom = items.get(ZOOM_KEY).cloned().unwrap_or(Value::Null);

        Ok(Self {
            mode: serde_json::from_value(mode)?,
            zoom: serde_json::from_value(zoom)?,
        })
    }
}
