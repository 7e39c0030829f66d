use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CacheError;

const CURRENT_VERSION: u32 = 1;

/// A stored provider response with its freshness window.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub payload: Vec<u8>,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

/// On-disk shape of an entry. Payload bytes are base64 encoded.
#[derive(Serialize, Deserialize)]
struct StoredEntry {
    version: u32,
    key: String,
    stored_at: DateTime<Utc>,
    ttl_ms: u64,
    payload: String,
}

impl CacheEntry {
    /// Instant at which the entry stops being served.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        self.stored_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// An entry is fresh while `now < stored_at + ttl`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    pub(crate) fn to_json(&self) -> Result<Vec<u8>, CacheError> {
        let stored = StoredEntry {
            version: CURRENT_VERSION,
            key: self.key.clone(),
            stored_at: self.stored_at,
            ttl_ms: u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX),
            payload: BASE64.encode(&self.payload),
        };
        Ok(serde_json::to_vec_pretty(&stored)?)
    }

    pub(crate) fn from_json(raw: &[u8]) -> Result<Self, CacheError> {
        let stored: StoredEntry = serde_json::from_slice(raw)?;
        if stored.version != CURRENT_VERSION {
            return Err(CacheError::Corrupt(format!(
                "unsupported entry version {}",
                stored.version
            )));
        }
        let payload = BASE64
            .decode(stored.payload)
            .map_err(|e| CacheError::Corrupt(format!("Failed to decode payload: {e}")))?;

        Ok(Self {
            key: stored.key,
            payload,
            stored_at: stored.stored_at,
            ttl: Duration::from_millis(stored.ttl_ms),
        })
    }
}
