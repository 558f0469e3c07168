// src/store/sqlite.rs
//
// Durable key-value store backed by SQLite
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Schema initialization is idempotent
// - Reads degrade to absence, writes may be dropped; both are logged

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::store::adapter::{prefixed, StoreAdapter, APP_PREFIX};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the default store file path
///
/// The store lives in the application data directory.
/// Path structure: {APP_DATA}/cinetech/cinetech.db
pub fn default_store_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Pool("Could not determine app data directory".to_string()))?;

    let cinetech_dir = app_data_dir.join("cinetech");
    std::fs::create_dir_all(&cinetech_dir).map_err(AppError::Io)?;

    Ok(cinetech_dir.join("cinetech.db"))
}

/// Key-value store persisted in a single SQLite table.
///
/// One row per namespaced key; the value column holds the serialized JSON
/// document for that key. Cross-process writers are last-write-wins; the WAL
/// and busy-timeout pragmas only keep concurrent access from erroring out.
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open (or create) a store file at the given path.
    pub fn open(path: &Path) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(15)
            .build(manager)
            .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a store at the default application data location.
    pub fn open_default() -> AppResult<Self> {
        Self::open(&default_store_path()?)
    }

    /// Open an in-memory store, useful for tests.
    ///
    /// The pool is capped at one connection: each SQLite `:memory:` connection
    /// is its own database.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create the backing table. Safe to call multiple times.
    fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_entries (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn conn(&self) -> AppResult<PooledConn> {
        self.pool
            .get()
            .map_err(|e| AppError::Pool(format!("Failed to get store connection: {}", e)))
    }

    fn read_raw(&self, stored_key: &str) -> AppResult<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM kv_entries WHERE key = ?1")?;

        match stmt.query_row(params![stored_key], |row| row.get(0)) {
            Ok(text) => Ok(Some(text)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn write_raw(&self, stored_key: &str, text: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_entries (key, value) VALUES (?1, ?2)",
            params![stored_key, text],
        )?;
        Ok(())
    }

    fn delete_raw(&self, stored_key: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![stored_key])?;
        Ok(())
    }

    fn clear_prefixed(&self) -> AppResult<()> {
        let conn = self.conn()?;
        // GLOB, not LIKE: the underscore in the prefix must match literally
        conn.execute(
            "DELETE FROM kv_entries WHERE key GLOB ?1 || '*'",
            params![APP_PREFIX],
        )?;
        Ok(())
    }
}

impl StoreAdapter for SqliteStore {
    fn get(&self, key: &str) -> Option<Value> {
        let stored_key = prefixed(key);
        match self.read_raw(&stored_key) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::error!("Corrupted entry under '{}': {}", stored_key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("Error reading '{}' from storage: {}", stored_key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &Value) {
        let stored_key = prefixed(key);
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error serializing '{}': {}", stored_key, e);
                return;
            }
        };

        if let Err(e) = self.write_raw(&stored_key, &text) {
            log::error!("Error writing '{}' to storage: {}", stored_key, e);
        }
    }

    fn remove(&self, key: &str) {
        let stored_key = prefixed(key);
        if let Err(e) = self.delete_raw(&stored_key) {
            log::error!("Error removing '{}' from storage: {}", stored_key, e);
        }
    }

    fn clear_all(&self) {
        if let Err(e) = self.clear_prefixed() {
            log::error!("Error clearing storage: {}", e);
        }
    }
}
