use thiserror::Error;

/// Failures of the cache storage itself. These never reach the caller of
/// [crate::get_or_fetch]; they are logged and the cache is bypassed.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Cache directory is unusable: {0}")]
    Directory(String),
}
