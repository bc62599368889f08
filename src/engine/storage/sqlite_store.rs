use anyhow::Result;
use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use r2d2_sqlite::rusqlite::{params, OpenFlags, OptionalExtension};
use serde_json::{Map, Value};

use crate::engine::storage::area::SettingsStore;

/// SQLite-based settings store. Values are kept as JSON text, one row per key.
pub struct SqliteSettingsStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteSettingsStore {
    /// Creates a new SQLite settings store with the specified database file path.
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE |
                    OpenFlags::SQLITE_OPEN_CREATE |
                    OpenFlags::SQLITE_OPEN_URI
            )
            .with_init(|c| {
                c.busy_timeout(std::time::Duration::from_millis(500))?;
                c.execute_batch(
                    "CREATE TABLE IF NOT EXISTS settings (
                        key TEXT NOT NULL PRIMARY KEY,
                        value TEXT NOT NULL,
                        updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
                    );"
                )?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(std::time::Duration::from_secs(5))
            .build(manager)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let pool = self.pool.clone();
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();

        tokio::task::spawn_blocking(move || -> Result<Map<String, Value>> {
            let conn = pool.get()?;
            let mut found = Map::new();
            for key in keys {
                let raw = conn
                    .query_row(
                        "SELECT value FROM settings WHERE key=?1",
                        params![key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;

                if let Some(raw) = raw {
                    found.insert(key, serde_json::from_str(&raw)?);
                }
            }
            Ok(found)
        })
        .await?
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let pool = self.pool.clone();

        // All keys land in one transaction, so a completed set means every item is stored.
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            for (key, value) in items {
                tx.execute(
                    "INSERT INTO settings(key,value) VALUES (?1,?2)
                     ON CONFLICT(key) DO UPDATE
                     SET value=excluded.value, updated_at=strftime('%s','now')",
                    params![key, value.to_string()],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await?
    }
}
