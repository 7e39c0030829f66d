use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::Tickers;
use crate::errors::MarketDataError;
use crate::models::{is_valid_symbol, normalize_symbol, PriceSnapshot};
use crate::provider::MarketDataProvider;
use crate::session::CachingSession;

/// Single-instrument snapshot accessor.
#[derive(Clone)]
pub struct TickerClient {
    session: Arc<CachingSession>,
    provider: Arc<dyn MarketDataProvider>,
}

impl TickerClient {
    pub fn new(session: Arc<CachingSession>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { session, provider }
    }

    pub fn session(&self) -> &Arc<CachingSession> {
        &self.session
    }

    pub fn provider(&self) -> &Arc<dyn MarketDataProvider> {
        &self.provider
    }

    /// Current snapshot of `symbol`.
    ///
    /// Invalid symbols fail with `UnknownTicker` before any network call. A
    /// payload that does not parse is evicted from the cache.
    pub async fn snapshot(&self, symbol: &str) -> Result<PriceSnapshot, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        if !is_valid_symbol(&symbol) {
            debug!("Rejecting invalid symbol '{}'", symbol);
            return Err(MarketDataError::UnknownTicker(symbol));
        }

        let request = self.provider.snapshot_request(&symbol);
        let payload = self
            .session
            .fetch(&request)
            .await
            .map_err(|e| self.provider.interpret_error(&symbol, e))?;

        let parsed = self.provider.parse_snapshot(&symbol, &payload);
        if let Err(MarketDataError::InvalidResponse { .. }) = &parsed {
            self.session.evict(&request);
        }
        parsed
    }

    /// A single attribute of the current snapshot of `symbol`.
    pub async fn attribute(&self, symbol: &str, name: &str) -> Result<Value, MarketDataError> {
        let snapshot = self.snapshot(symbol).await?;
        snapshot.attribute(name).cloned()
    }

    /// Batch accessor over `symbols`, sharing this client's session.
    pub fn batch<I, S>(&self, symbols: I) -> Tickers
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Tickers::new(symbols, self.clone())
    }
}
