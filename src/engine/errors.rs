use crate::tab::TabId;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Tab {tab_id} error: {error}")]
    Tab { tab_id: TabId, error: anyhow::Error },

    #[error("Tab query error: {0}")]
    TabQuery(anyhow::Error),

    #[error("Indicator error: {0}")]
    Indicator(anyhow::Error),

    #[error("Engine channel closed")]
    ChannelClosed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task initialization failed: {0}")]
    TaskInitFailed(anyhow::Error),
}
