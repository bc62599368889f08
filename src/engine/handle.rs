use tokio::sync::{broadcast, mpsc, oneshot};
use crate::config::LogLevel;
use crate::events::{EngineCommand, EngineEvent, HostEvent};
use crate::EngineError;

/// Cloneable handle to a running [`ZoomLockEngine`](crate::ZoomLockEngine).
///
/// Hosts forward their notifications through [`dispatch`](Self::dispatch). The engine handles
/// them one at a time, in the order they were dispatched.
#[derive(Clone)]
pub struct EngineHandle {
    /// Engine command sender
    cmd_tx: mpsc::Sender<EngineCommand>,
    /// Event sender, kept to hand out subscriptions
    event_tx: broadcast::Sender<EngineEvent>,
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("cmd_tx", &self.cmd_tx)
            .finish_non_exhaustive()
    }
}

impl EngineHandle {
    pub fn new(
        cmd_tx: mpsc::Sender<EngineCommand>,
        event_tx: broadcast::Sender<EngineEvent>,
    ) -> Self {
        Self { cmd_tx, event_tx }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    async fn send(&self, cmd: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(cmd).await.map_err(|_| EngineError::ChannelClosed)
    }

    /// Queue a host notification for the engine.
    pub async fn dispatch(&self, event: HostEvent) -> Result<(), EngineError> {
        self.send(EngineCommand::Host(event)).await
    }

    /// Change the log level of the running process.
    pub async fn set_log_level(&self, level: LogLevel) -> Result<(), EngineError> {
        self.send(EngineCommand::EnableLogging { level }).await
    }

    /// Gracefully shutdown the engine after the events queued before this call.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        let (tx, rx) = oneshot::channel();

        self.send(EngineCommand::Shutdown { reply: tx }).await?;

        rx.await.map_err(|e| EngineError::TaskInitFailed(e.into()))?
    }
}
