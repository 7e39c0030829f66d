//! Persistent response cache.
//!
//! Provider responses are stored on disk, one file per [`CacheKey`], inside a
//! namespace directory. Entries carry their own TTL and are checked lazily on
//! read; there is no background eviction.

mod entry;
mod file_cache;
mod key;

pub use entry::CacheEntry;
pub use file_cache::FileCache;
pub use key::CacheKey;

use thiserror::Error;

/// Errors raised by the file-backed cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache entry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
}
