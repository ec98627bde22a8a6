use thiserror::Error;

/// Message shown to users for any failure that is not the provider's own doing.
pub const TRANSIENT_FAILURE_MESSAGE: &str =
    "A technical failure has occurred. Please repeat your request later";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Connection problems, timeouts and undecodable bodies. Details are logged, never returned.
    #[error("{}", TRANSIENT_FAILURE_MESSAGE)]
    Transient,

    /// The provider answered with an explicit error message.
    #[error("{0}")]
    Provider(String),
}
