use anyhow::{bail, Context, Result};
use moviefinder_common::environment::{
    get_env_var, get_env_var_or, parse_env_var_or,
    variables::{API_KEY, HTTP_TIMEOUT_SECONDS, RATINGS_URL, SEARCH_URL, TITLE_URL},
};
use crate::Endpoint;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tracing::info;
use url::Url;

const SEARCH_URL_DEFAULT: &str = "https://imdb-api.com/en/API/SearchMovie/";
const TITLE_URL_DEFAULT: &str = "https://imdb-api.com/en/API/Title/";
const RATINGS_URL_DEFAULT: &str = "https://imdb-api.com/en/API/Ratings/";
const HTTP_TIMEOUT_DEFAULT: u64 = 10;

/// Settings to configure an [crate::ImdbApiClient].
#[derive(Clone)]
pub struct ProviderSettings {
    pub search_url: Url,
    pub title_url: Url,
    pub ratings_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Create a [ProviderSettings] by retrieving the values from the environment variables
    /// available to MovieFinder. Only the API key is mandatory.
    pub fn from_env() -> Result<Self> {
        let api_key = get_env_var(API_KEY)
            .with_context(|| "Could not retrieve the provider API key from the environment.")?;
        if api_key.is_empty() {
            bail!("{} must not be empty.", API_KEY);
        }

        Ok(ProviderSettings {
            search_url: get_base_url(SEARCH_URL, SEARCH_URL_DEFAULT)?,
            title_url: get_base_url(TITLE_URL, TITLE_URL_DEFAULT)?,
            ratings_url: get_base_url(RATINGS_URL, RATINGS_URL_DEFAULT)?,
            api_key,
            timeout: Duration::from_secs(parse_env_var_or(
                HTTP_TIMEOUT_SECONDS,
                HTTP_TIMEOUT_DEFAULT,
            )?),
        })
    }

    /// Build settings for a provider hosted entirely under `base`, e.g. a test server.
    pub fn with_base(base: &Url, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(ProviderSettings {
            search_url: base.join("API/SearchMovie/")?,
            title_url: base.join("API/Title/")?,
            ratings_url: base.join("API/Ratings/")?,
            api_key: String::from(api_key),
            timeout,
        })
    }

    pub fn base_url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Search => &self.search_url,
            Endpoint::Title => &self.title_url,
            Endpoint::Ratings => &self.ratings_url,
        }
    }
}

impl Debug for ProviderSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("search_url", &self.search_url.as_str())
            .field("title_url", &self.title_url.as_str())
            .field("ratings_url", &self.ratings_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn get_base_url(name: &str, default: &str) -> Result<Url> {
    let raw = get_env_var_or(name, default);
    info!(provider_url = %raw, "Found provider endpoint URL.");
    let url = Url::parse(&raw).with_context(|| format!("Parsing of {} failed.", name))?;
    if url.cannot_be_a_base() {
        bail!("{} cannot be used as a base URL: {}", name, raw);
    }
    Ok(url)
}
