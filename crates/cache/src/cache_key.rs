use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};

/// Identifies one logical provider request: the stage that issued it plus its query value.
///
/// Keys are hex encoded SHA-256 digests, so they are fixed-length and safe to use as file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a request made by `stage` with the query value `param`.
    pub fn for_request(stage: &str, param: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(stage.as_bytes());
        // The separator keeps ("ab", "c") and ("a", "bc") apart.
        hasher.update(b"\x1f");
        hasher.update(param.as_bytes());
        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
