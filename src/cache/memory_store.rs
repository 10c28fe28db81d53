use super::CacheStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A single cached value.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    /// `None` means the entry never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Process-local cache. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_entry<R>(&self, key: &str, read: impl FnOnce(&CacheEntry) -> R) -> Option<R> {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        let expired = entries.get(key)?.is_expired(now);
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(read)
    }

    fn insert(&self, key: &str, value: &str, expires_at: Option<Instant>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );
    }
}

impl CacheStore for InMemoryCacheStore {
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.live_entry(key, |_| ()).is_some())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.live_entry(key, |entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value, None);
        Ok(())
    }

    fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.insert(key, value, Some(Instant::now() + ttl));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        Ok(entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    fn evict_expired(&self) -> Result<usize> {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_set_get_exists() {
        let store = InMemoryCacheStore::new();
        assert!(!store.exists("a").unwrap());
        assert!(store.get("a").unwrap().is_none());

        store.set("a", "1").unwrap();
        assert!(store.exists("a").unwrap());
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_overwrite_is_last_write_wins() {
        let store = InMemoryCacheStore::new();
        store.set("a", "first").unwrap();
        store
            .set_with_ttl("a", "second", Duration::from_secs(60))
            .unwrap();
        assert_eq!(store.get("a").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let store = InMemoryCacheStore::new();
        store
            .set_with_ttl("a", "1", Duration::from_millis(10))
            .unwrap();
        assert!(store.exists("a").unwrap());

        sleep(Duration::from_millis(30));
        assert!(!store.exists("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_evict_expired_counts_only_expired() {
        let store = InMemoryCacheStore::new();
        store
            .set_with_ttl("short", "1", Duration::from_millis(5))
            .unwrap();
        store
            .set_with_ttl("long", "2", Duration::from_secs(60))
            .unwrap();
        store.set("forever", "3").unwrap();

        sleep(Duration::from_millis(20));
        assert_eq!(store.evict_expired().unwrap(), 1);
        assert!(store.exists("long").unwrap());
        assert!(store.exists("forever").unwrap());
    }

    #[test]
    fn test_delete() {
        let store = InMemoryCacheStore::new();
        store.set("a", "1").unwrap();
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(!store.exists("a").unwrap());
    }
}
