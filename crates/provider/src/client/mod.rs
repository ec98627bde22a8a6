pub(crate) mod configuration;

use crate::client::configuration::ProviderSettings;
use crate::{Endpoint, ProviderClient, ProviderError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use moviefinder_cache::{get_or_fetch, CacheKey, ResponseCache};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A [ProviderClient] for the IMDb-API service, with every request going through a
/// [ResponseCache].
#[derive(Clone)]
pub struct ImdbApiClient {
    http: reqwest::Client,
    settings: ProviderSettings,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl ImdbApiClient {
    /// Create a new [ImdbApiClient]. Every upstream request is bounded by the settings' timeout.
    pub fn new(
        settings: ProviderSettings,
        cache: Arc<dyn ResponseCache>,
        ttl: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build the provider HTTP client.")?;
        debug!(settings = ?settings, "Provider client is ready.");

        Ok(ImdbApiClient {
            http,
            settings,
            cache,
            ttl,
        })
    }

    /// `<endpoint base>/<api key>/<param>`, with each segment percent-encoded.
    fn request_url(&self, endpoint: Endpoint, param: &str) -> Result<Url, ProviderError> {
        let mut url = self.settings.base_url(endpoint).clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments
                    .pop_if_empty()
                    .push(&self.settings.api_key)
                    .push(param);
            }
            Err(_) => {
                warn!(
                    provider.endpoint = endpoint.as_ref(),
                    "Endpoint URL cannot take path segments."
                );
                return Err(ProviderError::Transient);
            }
        }
        Ok(url)
    }

    async fn fetch(&self, endpoint: Endpoint, url: Url) -> Result<Vec<u8>, ProviderError> {
        debug!(provider.endpoint = endpoint.as_ref(), "Requesting data from the provider.");
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport_failure(endpoint, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_failure(endpoint, e))?;

        if !status.is_success() {
            warn!(
                provider.endpoint = endpoint.as_ref(),
                http.status = status.as_u16(),
                "Provider answered with an unsuccessful status."
            );
            return Err(match provider_error_message_in(&body) {
                Some(message) => ProviderError::Provider(message),
                None => ProviderError::Transient,
            });
        }
        if body.is_empty() {
            warn!(provider.endpoint = endpoint.as_ref(), "Provider answered with an empty body.");
            return Err(ProviderError::Transient);
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl ProviderClient for ImdbApiClient {
    async fn call(&self, endpoint: Endpoint, param: &str) -> Result<Value, ProviderError> {
        let key = CacheKey::for_request(endpoint.as_ref(), param);
        let url = self.request_url(endpoint, param)?;
        let body = get_or_fetch(self.cache.as_ref(), &key, self.ttl, || {
            self.fetch(endpoint, url)
        })
        .await?;

        parse_response(endpoint, &body)
    }
}

fn transport_failure(endpoint: Endpoint, error: reqwest::Error) -> ProviderError {
    let timeout = error.is_timeout();
    // The URL carries the API key.
    let error = error.without_url();
    warn!(
        provider.endpoint = endpoint.as_ref(),
        timeout,
        error = %error,
        "Request to the provider failed."
    );
    ProviderError::Transient
}

fn parse_response(endpoint: Endpoint, body: &[u8]) -> Result<Value, ProviderError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!(
            provider.endpoint = endpoint.as_ref(),
            error = %e,
            "Could not decode the provider response."
        );
        ProviderError::Transient
    })?;
    match provider_error_message(&value) {
        Some(message) => {
            debug!(
                provider.endpoint = endpoint.as_ref(),
                provider.error = %message,
                "Provider reported an error."
            );
            Err(ProviderError::Provider(message))
        }
        None => Ok(value),
    }
}

fn provider_error_message(value: &Value) -> Option<String> {
    value
        .get("errorMessage")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

fn provider_error_message_in(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| provider_error_message(&v))
}
