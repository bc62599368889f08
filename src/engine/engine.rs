use crate::engine::handle::EngineHandle;
use crate::engine::policy::ZoomPolicy;
use crate::events::{EngineCommand, EngineEvent};
use crate::indicator::IndicatorService;
use crate::storage::SettingsStore;
use crate::tab::TabService;
use crate::{EngineConfig, EngineError};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Host services the engine works through.
#[derive(Clone)]
pub struct EngineServices {
    /// Tab enumeration and zoom get/set
    pub tabs: Arc<dyn TabService>,
    /// Persistent key/value settings storage
    pub store: Arc<dyn SettingsStore>,
    /// Badge text on the action button
    pub indicator: Arc<dyn IndicatorService>,
}

pub struct ZoomLockEngine {
    /// Configuration for the whole engine.
    config: Arc<EngineConfig>,
    /// Rules applied to each host event
    policy: ZoomPolicy,
    /// Command sender (cloned into handles).
    cmd_tx: mpsc::Sender<EngineCommand>,
    /// Command receiver (owned by the engine run loop).
    cmd_rx: mpsc::Receiver<EngineCommand>,
    /// Event sender
    event_tx: broadcast::Sender<EngineEvent>,
}

impl ZoomLockEngine {
    /// Create a new engine.
    ///
    /// If `config` is `None`, [`EngineConfig::default`] is used.
    pub fn new(config: Option<EngineConfig>, services: EngineServices) -> Self {
        let config = Arc::new(config.unwrap_or_default());

        // Host events and control commands share one channel, so they are handled in arrival order.
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>(config.channel_capacity);

        // Broadcast event bus. Subscribe to observe what the engine does.
        let (event_tx, _first_rx) = broadcast::channel::<EngineEvent>(config.channel_capacity);

        let policy = ZoomPolicy::new(config.clone(), services, event_tx.clone());

        Self {
            config,
            policy,
            cmd_tx,
            cmd_rx,
            event_tx,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Spawns the event loop on the current tokio runtime and returns a handle to it.
    pub fn start(self) -> Result<(EngineHandle, JoinHandle<()>), EngineError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| EngineError::TaskInitFailed(e.into()))?;

        let engine_handle = EngineHandle::new(self.cmd_tx.clone(), self.event_tx.clone());
        let join_handle = runtime.spawn(self.run());

        Ok((engine_handle, join_handle))
    }

    /// Run the engine's inbound command loop.
    ///
    /// Each command is handled to completion before the next one is received. The loop ends on
    /// [`EngineCommand::Shutdown`] or when all handles are dropped.
    pub async fn run(self) {
        let Self { config, policy, cmd_tx, mut cmd_rx, event_tx } = self;
        // Only handles keep the loop alive
        drop(cmd_tx);

        if let Some(level) = config.log_level {
            log::set_max_level(level.into());
        }

        log::debug!("Zoom lock engine started");
        let _ = event_tx.send(EngineEvent::EngineStarted);

        let mut reason = "All handles dropped".to_string();
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                EngineCommand::Host(event) => policy.handle_event(event).await,
                EngineCommand::EnableLogging { level } => {
                    log::set_max_level(level.into());
                    log::info!("Log level set to {:?}", level);
                }
                EngineCommand::Shutdown { reply } => {
                    reason = "Shutdown requested".to_string();
                    let _ = reply.send(Ok(()));
                    break;
                }
            }
        }

        log::debug!("Zoom lock engine stopped: {reason}");
        let _ = event_tx.send(EngineEvent::EngineShutdown { reason });
    }
}
