//! Key-value cache with per-entry time-to-live.
//!
//! Every pipeline stage memoizes its output here: a stage checks whether its
//! key exists and recomputes only on absence. There is no locking across the
//! check and the write, so two concurrent jobs for the same user may both
//! recompute a stage. Writes are whole-value overwrites, which makes that race
//! harmless (last write wins).

mod keys;
mod memory_store;
mod schema;
mod sqlite_store;

pub use keys::CacheKeys;
pub use memory_store::InMemoryCacheStore;
pub use sqlite_store::SqliteCacheStore;

use crate::config::{CacheBackend, CacheSettings};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Lifetime of every derived pipeline entry (raw items, analysis, analysis text).
pub const DERIVED_ENTRY_TTL: Duration = Duration::from_secs(900);

/// Storage backend for the cache layer.
///
/// An expired entry is indistinguishable from a missing one.
pub trait CacheStore: Send + Sync {
    /// Whether a live entry exists for `key`.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key` with no expiry, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Store `value` under `key`, expiring after `ttl`.
    fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Remove `key`. Returns whether a live entry was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Drop every expired entry, returning how many were removed.
    fn evict_expired(&self) -> Result<usize>;
}

/// JSON helpers available on every [`CacheStore`], including trait objects.
pub trait CacheStoreExt: CacheStore {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to decode cache entry {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set_json_with_ttl<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to encode cache entry {}", key))?;
        self.set_with_ttl(key, &raw, ttl)
    }
}

impl<S: CacheStore + ?Sized> CacheStoreExt for S {}

/// Build the cache backend selected in the configuration.
pub fn open_cache_store(settings: &CacheSettings) -> Result<Arc<dyn CacheStore>> {
    match &settings.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache store");
            Ok(Arc::new(InMemoryCacheStore::new()))
        }
        CacheBackend::Sqlite { db_path } => {
            info!("Opening SQLite cache store at {:?}", db_path);
            Ok(Arc::new(SqliteCacheStore::new(db_path)?))
        }
    }
}

/// Periodically evict expired entries until `shutdown` is cancelled.
pub fn spawn_cache_pruner(
    store: Arc<dyn CacheStore>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        // Skip the first immediate tick, wait for the first interval
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Cache pruner shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match store.evict_expired() {
                        Ok(count) => {
                            if count > 0 {
                                info!("Evicted {} expired cache entries", count);
                            }
                        }
                        Err(e) => {
                            error!("Failed to evict expired cache entries: {}", e);
                        }
                    }
                }
            }
        }
    })
}
