//! Time-expiring storage for raw provider responses, keyed by request identity.

mod cache_entry;
mod cache_error;
mod cache_key;
mod cache_settings;
mod file_cache;
mod memory_cache;

pub use cache_entry::CacheEntry;
pub use cache_error::CacheError;
pub use cache_key::CacheKey;
pub use cache_settings::{build_cache, CacheBackend, CacheSettings};
pub use file_cache::FileCache;
pub use memory_cache::MemoryCache;

use async_trait::async_trait;
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// The expiration policy used when nothing else is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Storage backend for cached provider responses.
///
/// Implementations must tolerate concurrent use with distinct keys. Concurrent writers to the
/// same key may race; whichever finishes last wins.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Load the entry stored under `key`, if any. Expiration is not checked here.
    async fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    /// Store `entry`, replacing anything previously stored under the same key.
    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError>;
}

/// Return the cached payload for `key` if it is younger than `ttl`; otherwise run `fetch`,
/// store its payload and return it.
///
/// A failed `fetch` is propagated as-is and leaves any existing entry untouched. Problems with
/// the cache itself are logged and never fail the call: an unreadable entry counts as a miss and
/// an unwritable one just means the next call fetches again.
///
/// Two callers missing on the same key at the same time will both fetch.
pub async fn get_or_fetch<C, F, Fut, E>(
    cache: &C,
    key: &CacheKey,
    ttl: Duration,
    fetch: F,
) -> Result<Vec<u8>, E>
where
    C: ResponseCache + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, E>>,
{
    match cache.load(key).await {
        Ok(Some(entry)) if entry.is_fresh(ttl, Utc::now()) => {
            debug!(cache.key = %key, "Cache hit.");
            return Ok(entry.payload);
        }
        Ok(Some(entry)) => {
            debug!(cache.key = %key, stored_at = %entry.stored_at, "Cached entry has expired.")
        }
        Ok(None) => debug!(cache.key = %key, "Cache miss."),
        Err(e) => warn!(
            cache.key = %key,
            error = ?e,
            "Could not read the cached entry; treating it as a miss."
        ),
    }

    let payload = fetch().await?;
    let entry = CacheEntry::new(key.clone(), payload);
    if let Err(e) = cache.store(&entry).await {
        warn!(cache.key = %key, error = ?e, "Failed to store the fetched payload.");
    }

    Ok(entry.payload)
}
