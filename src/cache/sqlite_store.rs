use super::schema::CACHE_VERSIONED_SCHEMAS;
use super::CacheStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Cache backend that survives process restarts.
///
/// Expired rows stay on disk until [`CacheStore::evict_expired`] runs, but are
/// never returned by reads.
pub struct SqliteCacheStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCacheStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let conn = Connection::open(path).context("Failed to open cache database")?;

        if is_new_db {
            info!("Creating new cache database at {:?}", path);
            Self::latest_schema()?.create(&conn)?;
        } else {
            let raw_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
            let db_version = raw_version - BASE_DB_VERSION as i64;

            let schema = CACHE_VERSIONED_SCHEMAS
                .iter()
                .find(|s| s.version as i64 == db_version)
                .with_context(|| format!("Unknown cache database version {}", db_version))?;
            schema.validate(&conn).with_context(|| {
                format!(
                    "Cache database schema validation failed for version {}",
                    db_version
                )
            })?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database with the latest schema.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory cache")?;
        Self::latest_schema()?.create(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn latest_schema() -> Result<&'static crate::sqlite_persistence::VersionedSchema> {
        CACHE_VERSIONED_SCHEMAS
            .last()
            .context("No cache schema defined")
    }

    fn upsert(&self, key: &str, value: &str, expires_at: Option<i64>) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO cache_entries (key, value, expires_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET value = ?2, expires_at = ?3, updated_at = ?4",
            params![key, value, expires_at, Utc::now().timestamp_millis()],
        )
        .with_context(|| format!("Failed to write cache entry {}", key))?;
        Ok(())
    }
}

impl CacheStore for SqliteCacheStore {
    fn exists(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM cache_entries
                 WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
                params![key, Utc::now().timestamp_millis()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM cache_entries
                 WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
                params![key, Utc::now().timestamp_millis()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.upsert(key, value, None)
    }

    fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = Utc::now().timestamp_millis() + ttl.as_millis() as i64;
        self.upsert(key, value, Some(expires_at))
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM cache_entries
             WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
            params![key, Utc::now().timestamp_millis()],
        )?;
        Ok(removed > 0)
    }

    fn evict_expired(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM cache_entries WHERE expires_at IS NOT NULL AND expires_at <= ?1",
            params![Utc::now().timestamp_millis()],
        )?;
        Ok(removed)
    }
}
