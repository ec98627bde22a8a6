//! Access to the upstream movie-metadata provider.

mod client;
mod endpoint;
mod provider_error;

pub use client::configuration::ProviderSettings;
pub use client::ImdbApiClient;
pub use endpoint::Endpoint;
pub use provider_error::{ProviderError, TRANSIENT_FAILURE_MESSAGE};

use async_trait::async_trait;
use serde_json::Value;

/// Issues logical requests to the movie-metadata provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Request `param` from `endpoint` and return the decoded JSON body.
    ///
    /// A body carrying a non-empty `errorMessage` is reported as [ProviderError::Provider];
    /// transport and decoding problems are reported as [ProviderError::Transient].
    async fn call(&self, endpoint: Endpoint, param: &str) -> Result<Value, ProviderError>;
}
