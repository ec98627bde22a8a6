use crate::{CacheEntry, CacheError, CacheKey, ResponseCache, DEFAULT_TTL};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// How many entries [MemoryCache::new] keeps before evicting the oldest.
pub(crate) const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Keeps entries in process memory.
///
/// Every store drops the entries that have outlived `ttl` and, if the map is still full, the
/// oldest remaining entry.
#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        MemoryCache::with_limits(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        MemoryCache::default()
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        MemoryCache {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }
}

fn evict_expired(entries: &mut HashMap<CacheKey, CacheEntry>, ttl: Duration, keep: &CacheKey) {
    let now = Utc::now();
    let before = entries.len();
    entries.retain(|key, entry| key == keep || entry.is_fresh(ttl, now));
    let evicted = before - entries.len();
    if evicted > 0 {
        debug!(evicted, "Dropped expired cache entries.");
    }
}

fn evict_oldest(entries: &mut HashMap<CacheKey, CacheEntry>) {
    let oldest = entries
        .values()
        .min_by_key(|entry| entry.stored_at)
        .map(|entry| entry.key.clone());
    if let Some(key) = oldest {
        debug!(cache.key = %key, "Cache is full; evicting the oldest entry.");
        entries.remove(&key);
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        evict_expired(&mut entries, self.ttl, &entry.key);
        while !entries.contains_key(&entry.key) && entries.len() >= self.max_entries {
            evict_oldest(&mut entries);
        }
        entries.insert(entry.key.clone(), entry.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn entry_aged(key: &CacheKey, payload: &[u8], age_seconds: i64) -> CacheEntry {
        CacheEntry {
            key: key.clone(),
            payload: payload.to_vec(),
            stored_at: Utc::now() - ChronoDuration::seconds(age_seconds),
        }
    }

    #[tokio::test]
    async fn load_returns_none_given_unknown_key() {
        // Arrange
        let cache = MemoryCache::new();

        // Act
        let actual = cache.load(&CacheKey::for_request("search", "heat")).await;

        // Assert
        assert!(actual.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_overwrites_previous_entry() {
        // Arrange
        let cache = MemoryCache::new();
        let key = CacheKey::for_request("search", "heat");
        cache
            .store(&CacheEntry::new(key.clone(), b"first".to_vec()))
            .await
            .unwrap();

        // Act
        cache
            .store(&CacheEntry::new(key.clone(), b"second".to_vec()))
            .await
            .unwrap();

        // Assert
        let actual = cache.load(&key).await.unwrap().unwrap();
        assert_eq!(b"second".to_vec(), actual.payload);
        assert_eq!(1, cache.entries.read().await.len());
    }

    #[tokio::test]
    async fn store_drops_expired_entries() {
        // Arrange
        let cache = MemoryCache::new();
        for i in 0..1000 {
            let key = CacheKey::for_request("search", &format!("title {}", i));
            cache.store(&entry_aged(&key, b"old", 3600)).await.unwrap();
        }
        let fresh = CacheKey::for_request("search", "heat");

        // Act
        crate::get_or_fetch(&cache, &fresh, DEFAULT_TTL, || async {
            Ok::<_, ()>(b"new".to_vec())
        })
        .await
        .unwrap();

        // Assert
        let entries = cache.entries.read().await;
        assert_eq!(1, entries.len());
        assert!(entries.contains_key(&fresh));
    }

    #[tokio::test]
    async fn store_evicts_oldest_entry_when_full() {
        // Arrange
        let cache = MemoryCache::with_limits(DEFAULT_TTL, 2);
        let oldest = CacheKey::for_request("title", "tt0000001");
        let newer = CacheKey::for_request("title", "tt0000002");
        let newest = CacheKey::for_request("title", "tt0000003");
        cache.store(&entry_aged(&oldest, b"1", 30)).await.unwrap();
        cache.store(&entry_aged(&newer, b"2", 10)).await.unwrap();

        // Act
        cache.store(&entry_aged(&newest, b"3", 0)).await.unwrap();

        // Assert
        assert!(cache.load(&oldest).await.unwrap().is_none());
        assert!(cache.load(&newer).await.unwrap().is_some());
        assert!(cache.load(&newest).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn store_replacing_key_does_not_evict_when_full() {
        // Arrange
        let cache = MemoryCache::with_limits(DEFAULT_TTL, 2);
        let first = CacheKey::for_request("ratings", "tt0000001");
        let second = CacheKey::for_request("ratings", "tt0000002");
        cache.store(&entry_aged(&first, b"1", 20)).await.unwrap();
        cache.store(&entry_aged(&second, b"2", 10)).await.unwrap();

        // Act
        cache.store(&entry_aged(&second, b"2b", 0)).await.unwrap();

        // Assert
        assert!(cache.load(&first).await.unwrap().is_some());
        assert_eq!(b"2b".to_vec(), cache.load(&second).await.unwrap().unwrap().payload);
    }
}
