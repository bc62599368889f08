//! Zoom policy: decides, for every host event, which tabs get their zoom overwritten and
//! whether the stored setting changes.
//!
//! The policy has two states, unlocked and locked. Only [`ZoomPolicy::toggle`] switches
//! between them. A zoom change on a tab while locked re-captures the stored zoom, it never
//! unlocks. Every handler re-reads the stored setting before acting.
//!
//! Failures of host calls are absorbed at [`ZoomPolicy::handle_event`]: they are logged and
//! published as [`EngineEvent::Warning`]. A failed settings read or write ends the handler. A
//! failed badge update does not stop the sweep that follows it, and a tab that cannot be
//! zoomed does not stop the sweep over the other tabs.

use crate::config::EngineConfig;
use crate::engine::engine::EngineServices;
use crate::events::{EngineEvent, HostEvent, InstallReason};
use crate::indicator::IndicatorService;
use crate::settings::ZoomSetting;
use crate::storage::SettingsService;
use crate::tab::{ChangeInfo, TabId, TabInfo, TabService};
use crate::EngineError;
use std::sync::Arc;
use tokio::sync::broadcast;

pub struct ZoomPolicy {
    config: Arc<EngineConfig>,
    tabs: Arc<dyn TabService>,
    settings: SettingsService,
    indicator: Arc<dyn IndicatorService>,
    event_tx: broadcast::Sender<EngineEvent>,
}

impl ZoomPolicy {
    pub fn new(
        config: Arc<EngineConfig>,
        services: EngineServices,
        event_tx: broadcast::Sender<EngineEvent>,
    ) -> Self {
        Self {
            config,
            tabs: services.tabs,
            settings: SettingsService::new(services.store),
            indicator: services.indicator,
            event_tx,
        }
    }

    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: EngineEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    fn report(&self, error: &EngineError) {
        log::warn!("{error}");
        self.emit(EngineEvent::Warning { message: error.to_string() });
    }

    async fn load(&self) -> Result<ZoomSetting, EngineError> {
        self.settings.load().await.map_err(EngineError::Storage)
    }

    /// Forces the setting onto one tab. Returns true when a zoom command was issued.
    ///
    /// Privileged pages and the unlocked mode never get a zoom command.
    pub async fn apply_to_tab(&self, tab: &TabInfo, setting: &ZoomSetting) -> Result<bool, EngineError> {
        if self.config.is_privileged(&tab.url) {
            log::trace!("Tab {} is privileged ({}), not zooming", tab.id, tab.url);
            return Ok(false);
        }
        if !setting.is_locked() {
            return Ok(false);
        }

        self.tabs
            .set_zoom(tab.id, setting.zoom)
            .await
            .map_err(|error| EngineError::Tab { tab_id: tab.id, error })?;

        self.emit(EngineEvent::TabZoomApplied { tab_id: tab.id, zoom: setting.zoom });
        Ok(true)
    }

    /// Applies the setting to every open tab, in host order. A failing tab does not stop the
    /// sweep. Returns the number of tabs that received a zoom command.
    pub async fn apply_to_all_tabs(&self, setting: &ZoomSetting) -> Result<usize, EngineError> {
        let tabs = self.tabs.query_all().await.map_err(EngineError::TabQuery)?;

        let mut applied = 0;
        for tab in &tabs {
            match self.apply_to_tab(tab, setting).await {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(e) => self.report(&e),
            }
        }

        log::debug!("Swept {} tabs, zoom applied to {}", tabs.len(), applied);
        Ok(applied)
    }

    /// Shows the badge text for the setting.
    pub async fn update_indicator(&self, setting: &ZoomSetting) -> Result<(), EngineError> {
        let text = setting.badge_text();
        self.indicator
            .set_badge_text(&text)
            .await
            .map_err(EngineError::Indicator)?;

        self.emit(EngineEvent::IndicatorUpdated { text });
        Ok(())
    }

    /// Stores the setting, then updates the badge and sweeps all tabs.
    ///
    /// Nothing but the store is touched until the write is acknowledged. A failing badge does
    /// not prevent the sweep.
    pub async fn persist(&self, setting: ZoomSetting) -> Result<(), EngineError> {
        self.settings.save(&setting).await.map_err(EngineError::Storage)?;

        log::info!("Zoom setting stored: mode={} zoom={}", setting.mode, setting.zoom);
        self.emit(EngineEvent::SettingsPersisted { setting });

        self.refresh(&setting).await
    }

    async fn refresh(&self, setting: &ZoomSetting) -> Result<(), EngineError> {
        if let Err(e) = self.update_indicator(setting).await {
            self.report(&e);
        }
        self.apply_to_all_tabs(setting).await?;
        Ok(())
    }

    /// Flips the lock from the given tab. Locking captures the tab's live zoom.
    pub async fn toggle(&self, tab: &TabInfo) -> Result<ZoomSetting, EngineError> {
        let live_zoom = self
            .tabs
            .get_zoom(tab.id)
            .await
            .map_err(|error| EngineError::Tab { tab_id: tab.id, error })?;

        let current = self.load().await?;
        let next = current.toggled(live_zoom);
        log::info!("Zoom lock {} -> {} from tab {} (live zoom {})", current.mode, next.mode, tab.id, live_zoom);

        self.persist(next).await?;
        Ok(next)
    }

    pub async fn on_tab_created(&self, tab: &TabInfo) -> Result<(), EngineError> {
        let setting = self.load().await?;
        self.apply_to_tab(tab, &setting).await?;
        Ok(())
    }

    pub async fn on_tab_updated(&self, tab_id: TabId, change_info: &ChangeInfo, tab: &TabInfo) -> Result<(), EngineError> {
        log::trace!("Tab {tab_id} changed: {change_info:?}");
        let setting = self.load().await?;
        self.apply_to_tab(tab, &setting).await?;
        Ok(())
    }

    /// A zoom change on a locked tab becomes the new locked zoom for all tabs.
    pub async fn on_zoom_changed(&self, tab_id: TabId, old_zoom_factor: f64, new_zoom_factor: f64) -> Result<(), EngineError> {
        // The host repeats notifications without an actual change
        if new_zoom_factor == old_zoom_factor {
            return Ok(());
        }

        let setting = self.load().await?;
        if setting.is_locked() && setting.zoom != new_zoom_factor {
            log::info!("Tab {tab_id} re-zoomed to {new_zoom_factor} while locked at {}", setting.zoom);
            self.persist(ZoomSetting::locked(new_zoom_factor)).await?;
        }
        Ok(())
    }

    /// Resets to unlocked with the host default zoom, whatever was stored before.
    pub async fn on_installed(&self, reason: InstallReason) -> Result<(), EngineError> {
        log::info!("Installed ({reason}), resetting zoom setting");
        self.persist(ZoomSetting::unlocked()).await
    }

    /// Re-asserts the stored setting without writing it.
    pub async fn on_startup(&self) -> Result<(), EngineError> {
        let setting = self.load().await?;
        self.refresh(&setting).await
    }

    pub async fn on_action_clicked(&self, tab: &TabInfo) -> Result<(), EngineError> {
        self.toggle(tab).await?;
        Ok(())
    }

    /// Routes a host notification to its handler. Never fails: errors are logged and
    /// published as warnings.
    pub async fn handle_event(&self, event: HostEvent) {
        log::debug!("{}: {:?}", event.name(), event);

        let result = match &event {
            HostEvent::TabCreated { tab } => self.on_tab_created(tab).await,
            HostEvent::TabUpdated { tab_id, change_info, tab } => {
                self.on_tab_updated(*tab_id, change_info, tab).await
            }
            HostEvent::ZoomChanged { tab_id, old_zoom_factor, new_zoom_factor } => {
                self.on_zoom_changed(*tab_id, *old_zoom_factor, *new_zoom_factor).await
            }
            HostEvent::Installed { reason } => self.on_installed(*reason).await,
            HostEvent::Startup => self.on_startup().await,
            HostEvent::ActionClicked { tab } => self.on_action_clicked(tab).await,
        };

        if let Err(e) = result {
            self.report(&e);
        }
    }
}
