use anyhow::{Context, Result};
use moviefinder_cache::{build_cache, CacheSettings};
use moviefinder_provider::{ImdbApiClient, ProviderSettings};
use moviefinder_resolver::MovieResolver;
use tracing::info;

/// Build the [MovieResolver] along with the cache and provider client behind it, all configured
/// from the environment.
pub fn initialize_resolver() -> Result<MovieResolver<ImdbApiClient>> {
    let cache_settings = CacheSettings::from_env()?;
    let cache = build_cache(&cache_settings).context("Failed to build the response cache.")?;

    let provider_settings = ProviderSettings::from_env()?;
    info!(settings = ?provider_settings, "Found provider settings.");
    let client = ImdbApiClient::new(provider_settings, cache, cache_settings.ttl)
        .context("Failed to create the provider client.")?;

    Ok(MovieResolver::new(client))
}
