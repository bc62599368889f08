//! Engine event types and commands.
//!
//! # Main Types
//!
//! - [`HostEvent`]: Notifications delivered by the host browser (tab and extension lifecycle).
//! - [`EngineCommand`]: Messages accepted by the engine event loop.
//! - [`EngineEvent`]: Events emitted by the engine for observers.

use crate::config::LogLevel;
use crate::settings::ZoomSetting;
use crate::tab::{ChangeInfo, TabId, TabInfo};
use crate::EngineError;
use std::fmt::Display;
use tokio::sync::oneshot;

/// Why the host reports the extension as installed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InstallReason {
    Install,
    Update,
    BrowserUpdate,
    SharedModuleUpdate,
}

impl Display for InstallReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallReason::Install => write!(f, "install"),
            InstallReason::Update => write!(f, "update"),
            InstallReason::BrowserUpdate => write!(f, "browser_update"),
            InstallReason::SharedModuleUpdate => write!(f, "shared_module_update"),
        }
    }
}

/// Notifications from the host browser
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    // ****************************************
    // ** Tabs
    /// A tab has been created
    TabCreated { tab: TabInfo },
    /// Some property of a tab changed (including navigation)
    TabUpdated { tab_id: TabId, change_info: ChangeInfo, tab: TabInfo },
    /// The zoom of a tab changed, by any actor
    ZoomChanged { tab_id: TabId, old_zoom_factor: f64, new_zoom_factor: f64 },

    // ****************************************
    // ** Extension lifecycle
    /// Extension was installed or updated
    Installed { reason: InstallReason },
    /// Browser profile started with the extension already installed
    Startup,
    /// User clicked the extension's action button while on a tab
    ActionClicked { tab: TabInfo },
}

impl HostEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::TabCreated { .. } => "tabs.onCreated",
            HostEvent::TabUpdated { .. } => "tabs.onUpdated",
            HostEvent::ZoomChanged { .. } => "tabs.onZoomChange",
            HostEvent::Installed { .. } => "runtime.onInstalled",
            HostEvent::Startup => "runtime.onStartup",
            HostEvent::ActionClicked { .. } => "action.onClicked",
        }
    }
}

#[derive(Debug)]
pub enum EngineCommand {
    // ****************************************
    // ** Host
    /// Handle a host notification
    Host(HostEvent),

    // ****************************************
    // ** Engine control
    /// Gracefully shutdown the engine
    Shutdown {
        reply: oneshot::Sender<Result<(), EngineError>>,
    },

    // ****************************************
    // ** Debug / devtools
    /// Change the log level
    EnableLogging { level: LogLevel },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ****************************************
    // ** Engine lifecycle
    /// Engine has started
    EngineStarted,
    /// A failure was absorbed while handling an event
    Warning { message: String },
    /// Engine is shutting down
    EngineShutdown { reason: String },

    // ****************************************
    // ** Policy
    /// A new setting has been durably stored
    SettingsPersisted { setting: ZoomSetting },
    /// The badge text has been updated
    IndicatorUpdated { text: String },
    /// A zoom command has been issued for a tab
    TabZoomApplied { tab_id: TabId, zoom: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_reason_display() {
        assert_eq!(InstallReason::Install.to_string(), "install");
        assert_eq!(InstallReason::BrowserUpdate.to_string(), "browser_update");
    }

    #[test]
    fn host_event_names() {
        let tab = TabInfo::new(TabId::new(), "https://a.test");
        assert_eq!(HostEvent::TabCreated { tab: tab.clone() }.name(), "tabs.onCreated");
        assert_eq!(
            HostEvent::ZoomChanged { tab_id: tab.id, old_zoom_factor: 1.0, new_zoom_factor: 2.0 }.name(),
            "tabs.onZoomChange"
        );
        assert_eq!(HostEvent::Startup.name(), "runtime.onStartup");
        assert_eq!(HostEvent::ActionClicked { tab }.name(), "action.onClicked");
    }

    #[test]
    fn engineevent_simple_variants_debug() {
        let a = EngineEvent::EngineStarted;
        let b = EngineEvent::Warning { message: "Heads up".into() };
        let c = EngineEvent::IndicatorUpdated { text: "def".into() };

        assert!(format!("{a:?}").contains("EngineStarted"));
        assert!(format!("{b:?}").contains("Warning"));
        assert!(format!("{c:?}").contains("def"));
    }
}
