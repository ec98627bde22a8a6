use crate::CacheKey;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;

/// A raw response body together with the moment it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub payload: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(key: CacheKey, payload: Vec<u8>) -> Self {
        CacheEntry {
            key,
            payload,
            stored_at: Utc::now(),
        }
    }

    /// An entry is fresh while `now - stored_at < ttl`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match ChronoDuration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.stored_at) < ttl,
            // A TTL too large to represent never expires.
            Err(_) => true,
        }
    }
}
