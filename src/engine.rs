//! Zoom lock engine.
//!
//! The engine keeps every open tab at one globally stored zoom factor while
//! the lock is engaged. It consumes three host services:
//!
//! - a [`TabService`](tab::TabService) to enumerate tabs and get/set their zoom,
//! - a [`SettingsStore`](storage::SettingsStore) to persist the `(mode, zoom)` pair,
//! - an [`IndicatorService`](indicator::IndicatorService) to show a short badge text.
//!
//! Host notifications ([`HostEvent`]) are routed through a [`ZoomPolicy`], either
//! directly or through the serial event loop run by [`ZoomLockEngine`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoom_lock::{EngineServices, HostEvent, ZoomLockEngine};
//! use zoom_lock::indicator::InMemoryIndicator;
//! use zoom_lock::storage::InMemorySettingsStore;
//! use zoom_lock::tab::InMemoryTabService;
//!
//! # async fn run() -> Result<(), zoom_lock::EngineError> {
//! let services = EngineServices {
//!     tabs: Arc::new(InMemoryTabService::new()),
//!     store: Arc::new(InMemorySettingsStore::new()),
//!     indicator: Arc::new(InMemoryIndicator::new()),
//! };
//!
//! let engine = ZoomLockEngine::new(None, services);
//! let (handle, join) = engine.start()?;
//!
//! handle.dispatch(HostEvent::Startup).await?;
//! handle.shutdown().await?;
//! let _ = join.await;
//! # Ok(())
//! # }
//! ```

/// Engine configuration
pub mod config;
/// The serial event loop
#[allow(clippy::module_inception)]
pub mod engine;
/// Engine error type
pub mod errors;
/// Host events, engine commands and engine events
pub mod events;
/// Handle to a running engine
pub mod handle;
/// Badge indicator service
pub mod indicator;
/// Zoom policy rules and event handlers
pub mod policy;
/// Persisted zoom setting
pub mod settings;
/// Settings storage
pub mod storage;
/// Tab service and tab types
pub mod tab;

/// Default capacity for the command and event channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 512;

pub use config::{EngineConfig, EngineConfigBuilder, LogLevel};
pub use engine::{EngineServices, ZoomLockEngine};
pub use errors::EngineError;
pub use events::{EngineCommand, EngineEvent, HostEvent, InstallReason};
pub use handle::EngineHandle;
pub use policy::ZoomPolicy;
pub use settings::{ZoomMode, ZoomSetting};
