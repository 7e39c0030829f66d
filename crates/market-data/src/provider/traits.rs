//! Market data provider trait definitions.

use std::collections::HashMap;

use crate::errors::MarketDataError;
use crate::models::{normalize_symbol, PriceSnapshot, RequestSpec};

use super::capabilities::RateLimit;

/// Per-symbol outcome of a batch request, keyed by normalized symbol.
pub type BatchSnapshots = HashMap<String, Result<PriceSnapshot, MarketDataError>>;

/// Trait for market data providers.
///
/// A provider knows how to ask for a snapshot and how to read the answer.
/// It does not perform I/O; the session layer does.
///
/// # Example
///
/// ```ignore
/// use fincli_market_data::provider::{MarketDataProvider, RateLimit};
///
/// struct MyProvider;
///
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     // ... implement snapshot_request / parse_snapshot
/// }
/// ```
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider ("YAHOO", ...).
    fn id(&self) -> &'static str;

    /// Rate limits that should be applied when calling this provider.
    fn rate_limit(&self) -> RateLimit;

    /// Request for the snapshot of a single (normalized) symbol.
    fn snapshot_request(&self, symbol: &str) -> RequestSpec;

    /// Build a snapshot from the payload returned for `snapshot_request`.
    ///
    /// Fails with `UnknownTicker` when the payload says the symbol has no data.
    fn parse_snapshot(&self, symbol: &str, payload: &[u8]) -> Result<PriceSnapshot, MarketDataError>;

    /// How many symbols a single batch request may carry.
    ///
    /// Default is 1: batches are fetched one symbol at a time.
    fn max_batch_size(&self) -> usize {
        1
    }

    /// Request covering several symbols (at most `max_batch_size`).
    fn batch_request(&self, symbols: &[String]) -> RequestSpec {
        let first = symbols.first().map(String::as_str).unwrap_or_default();
        self.snapshot_request(first)
    }

    /// Split a batch payload into per-symbol results.
    ///
    /// Every requested symbol gets an entry; symbols absent from the payload
    /// map to `UnknownTicker`.
    fn parse_batch(
        &self,
        symbols: &[String],
        payload: &[u8],
    ) -> Result<BatchSnapshots, MarketDataError> {
        let mut results = BatchSnapshots::new();
        if let Some(first) = symbols.first() {
            let symbol = normalize_symbol(first);
            let snapshot = self.parse_snapshot(&symbol, payload);
            results.insert(symbol, snapshot);
        }
        Ok(results)
    }

    /// Translate a transport failure into a provider-aware error.
    ///
    /// `symbol` is the symbol (or comma-joined symbols) the request was for.
    /// The default returns the error unchanged.
    fn interpret_error(&self, symbol: &str, error: MarketDataError) -> MarketDataError {
        let _ = symbol;
        error
    }
}
