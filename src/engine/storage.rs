//! Settings storage for the zoom lock engine.
//!
//! The host provides a flat key/value store (values are JSON). The engine only ever uses two
//! keys of it, see [`settings`](crate::settings).
//!
//! # Available types
//!
//! - [`SettingsStore`]: Trait for any key/value storage backend.
//! - [`InMemorySettingsStore`]: Ephemeral backend, used for tests and demos.
//! - [`SqliteSettingsStore`]: SQLite-backed persistent backend (feature `sqlite_store`).
//! - [`SettingsService`]: Loads and saves a [`ZoomSetting`](crate::settings::ZoomSetting)
//!   and notifies subscribers of changes.
//! - [`StorageEvent`]: Describes one changed key.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoom_lock::storage::{SettingsService, SqliteSettingsStore};
//!
//! let store = Arc::new(SqliteSettingsStore::new("zoom-lock.db").unwrap());
//! let settings = SettingsService::new(store);
//! let mut changes = settings.subscribe();
//! ```

/// Key/value store trait
pub mod area;
/// Storage change events
pub mod event;
/// In-memory store
pub mod in_memory;
/// Settings service on top of a store
pub mod service;
/// SQLite-backed store
#[cfg(feature = "sqlite_store")]
pub mod sqlite_store;

pub use area::SettingsStore;
pub use event::StorageEvent;
pub use in_memory::InMemorySettingsStore;
pub use service::{SettingsService, Subscription};
#[cfg(feature = "sqlite_store")]
pub use sqlite_store::SqliteSettingsStore;
