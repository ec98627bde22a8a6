//! Builds the configured [ResponseCache] from the environment.

use crate::memory_cache::DEFAULT_MAX_ENTRIES;
use crate::{CacheError, FileCache, MemoryCache, ResponseCache, DEFAULT_TTL};
use anyhow::{Context, Result};
use moviefinder_common::environment::{
    get_env_var_or, parse_env_var_or,
    variables::{CACHE_BACKEND, CACHE_DIR, CACHE_TTL_SECONDS},
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::{AsRefStr, EnumString};
use tracing::info;

const CACHE_DIR_DEFAULT: &str = "cache";

/// Where cached responses live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CacheBackend {
    /// One file per request identity under [CacheSettings::dir].
    File,
    /// Process memory; lost on restart.
    Memory,
}

/// Settings to configure the response cache.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub dir: PathBuf,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            backend: CacheBackend::File,
            dir: PathBuf::from(CACHE_DIR_DEFAULT),
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheSettings {
    /// Read the cache settings from the environment, using the defaults for anything not set.
    pub fn from_env() -> Result<Self> {
        let raw_backend = get_env_var_or(CACHE_BACKEND, CacheBackend::File.as_ref());
        let backend = CacheBackend::from_str(&raw_backend.to_lowercase())
            .with_context(|| format!("Unknown cache backend \"{}\".", raw_backend))?;
        let ttl_seconds = parse_env_var_or(CACHE_TTL_SECONDS, DEFAULT_TTL.as_secs())?;

        Ok(CacheSettings {
            backend,
            dir: PathBuf::from(get_env_var_or(CACHE_DIR, CACHE_DIR_DEFAULT)),
            ttl: Duration::from_secs(ttl_seconds),
        })
    }
}

/// Build the cache backend selected by `settings`.
pub fn build_cache(settings: &CacheSettings) -> Result<Arc<dyn ResponseCache>, CacheError> {
    info!(
        cache.backend = settings.backend.as_ref(),
        cache.ttl_seconds = settings.ttl.as_secs(),
        "Building the response cache."
    );
    let cache: Arc<dyn ResponseCache> = match settings.backend {
        CacheBackend::File => Arc::new(FileCache::new(&settings.dir)?),
        CacheBackend::Memory => {
            Arc::new(MemoryCache::with_limits(settings.ttl, DEFAULT_MAX_ENTRIES))
        }
    };

    Ok(cache)
}
