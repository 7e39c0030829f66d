use std::fmt;

use sha2::{Digest, Sha256};

use crate::models::RequestSpec;

/// Deterministic identity of a cacheable request.
///
/// The SHA-256 of the request's canonical form (method, URL, sorted
/// parameters), hex encoded. Safe to use as a file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(request: &RequestSpec) -> Self {
        let digest = Sha256::digest(request.canonical().as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&RequestSpec> for CacheKey {
    fn from(request: &RequestSpec) -> Self {
        Self::derive(request)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
