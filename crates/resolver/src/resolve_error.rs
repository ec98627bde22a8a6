use moviefinder_provider::{ProviderError, TRANSIENT_FAILURE_MESSAGE};
use thiserror::Error;

/// Shown when a request arrives without a usable title.
pub const INVALID_REQUEST_MESSAGE: &str =
    "Using correct pattern: /movies?title={expression}[&year={expression}]";

/// Why a resolution ended without a [crate::MovieRecord].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The title is missing or empty; nothing was requested upstream.
    #[error("{}", INVALID_REQUEST_MESSAGE)]
    InvalidRequest,

    /// Network or decoding trouble. The details stay in the logs.
    #[error("{}", TRANSIENT_FAILURE_MESSAGE)]
    Transient,

    /// The provider reported an error; its message is passed through verbatim.
    #[error("{0}")]
    Provider(String),

    /// No single movie could be settled on, or its details could not be fetched.
    #[error("{0}")]
    NotFound(String),

    /// The detail record had a field that could not be coerced. Holds the field name.
    #[error("{}", TRANSIENT_FAILURE_MESSAGE)]
    MalformedRecord(String),
}

impl From<ProviderError> for ResolveError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Transient => ResolveError::Transient,
            ProviderError::Provider(message) => ResolveError::Provider(message),
        }
    }
}
