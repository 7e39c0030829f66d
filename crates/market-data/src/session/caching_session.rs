//! Cache-then-limiter-then-network request session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::task;

use super::{HttpTransport, RateLimiter};
use crate::cache::{CacheKey, FileCache};
use crate::errors::MarketDataError;
use crate::models::{Payload, RequestSpec};

/// Whether cached responses may be served.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve fresh entries from the cache.
    #[default]
    Use,
    /// Skip cache reads and always hit the network. Responses are still
    /// written back so later sessions benefit from them.
    Refresh,
}

/// Hit/miss counters of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub hits: u64,
    pub misses: u64,
}

/// Mediates every outbound provider request.
///
/// A fresh cache entry is returned without touching the limiter. On a miss the
/// caller waits for limiter admission, the transport performs the call, and the
/// response is stored before being returned. Transport errors are returned
/// unchanged; retries belong to the caller.
pub struct CachingSession {
    cache: Arc<FileCache>,
    limiter: Arc<RateLimiter>,
    transport: Arc<dyn HttpTransport>,
    ttl: Duration,
    policy: CachePolicy,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachingSession {
    /// Create a session writing entries with the cache's default TTL.
    pub fn new(
        cache: Arc<FileCache>,
        limiter: Arc<RateLimiter>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let ttl = cache.default_ttl();
        Self {
            cache,
            limiter,
            transport,
            ttl,
            policy: CachePolicy::Use,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache(&self) -> &Arc<FileCache> {
        &self.cache
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Fetch the payload for `request`, from cache when possible.
    pub async fn fetch(&self, request: &RequestSpec) -> Result<Payload, MarketDataError> {
        let key = CacheKey::derive(request);

        if self.policy == CachePolicy::Use {
            if let Some(payload) = self.read(&key).await {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {} ({})", request, key);
                return Ok(payload);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for {} ({})", request, key);

        self.limiter.admit().await;
        let payload = self.transport.send(request).await?;

        self.write(request, key, payload.clone()).await;
        Ok(payload)
    }

    /// Drop the cached response for `request`, if any.
    ///
    /// Accessors call this when a stored payload cannot be parsed, so the next
    /// call goes back to the network instead of replaying it until expiry.
    pub fn evict(&self, request: &RequestSpec) {
        let key = CacheKey::derive(request);
        match self.cache.remove(&key) {
            Ok(()) => debug!("Evicted cached response for {} ({})", request, key),
            Err(e) => warn!("Failed to evict cached response for {}: {}", request, e),
        }
    }

    async fn read(&self, key: &CacheKey) -> Option<Payload> {
        let cache = Arc::clone(&self.cache);
        let key = key.clone();
        match task::spawn_blocking(move || cache.get(&key)).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Cache read task failed: {}", e);
                None
            }
        }
    }

    async fn write(&self, request: &RequestSpec, key: CacheKey, payload: Payload) {
        let cache = Arc::clone(&self.cache);
        let ttl = self.ttl;
        let written = task::spawn_blocking(move || cache.put(&key, &payload, ttl)).await;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to cache response for {}: {}", request, e),
            Err(e) => warn!("Cache write task failed for {}: {}", request, e),
        }
    }
}
