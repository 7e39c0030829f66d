use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, warn};

use super::TickerClient;
use crate::errors::MarketDataError;
use crate::models::{is_valid_symbol, normalize_symbol, PriceSnapshot};
use crate::provider::BatchSnapshots;

/// Batch snapshot accessor over a fixed set of symbols.
///
/// Members are normalized (trimmed, upper-cased) and de-duplicated in
/// first-seen order.
#[derive(Clone)]
pub struct Tickers {
    symbols: Vec<String>,
    client: TickerClient,
}

impl Tickers {
    pub fn new<I, S>(symbols: I, client: TickerClient) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let symbols = symbols
            .into_iter()
            .map(|s| normalize_symbol(s.as_ref()))
            .filter(|s| seen.insert(s.clone()))
            .collect();
        Self { symbols, client }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = normalize_symbol(symbol);
        self.symbols.iter().any(|s| *s == symbol)
    }

    /// Snapshot of one member. Non-members fail with `UnknownTicker`.
    ///
    /// The member is read from the batch request of its chunk, the same
    /// request `fetch_all` issues, so members of one chunk share a single
    /// provider call and later reads are cache hits.
    pub async fn snapshot(&self, symbol: &str) -> Result<PriceSnapshot, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        if !self.contains(&symbol) || !is_valid_symbol(&symbol) {
            return Err(MarketDataError::UnknownTicker(symbol));
        }

        let valid = self.valid_symbols();
        let chunk = match valid
            .chunks(self.chunk_size())
            .find(|chunk| chunk.contains(&symbol))
        {
            Some(chunk) => chunk,
            None => return Err(MarketDataError::UnknownTicker(symbol)),
        };

        self.fetch_chunk(chunk)
            .await?
            .remove(&symbol)
            .unwrap_or(Err(MarketDataError::UnknownTicker(symbol)))
    }

    /// Snapshots of every member, keyed by normalized symbol.
    ///
    /// Members are requested in chunks of the provider's batch size, all chunks
    /// concurrently. Symbols without data come back as inner `UnknownTicker`
    /// results; transport and provider failures fail the whole call.
    pub async fn fetch_all(&self) -> Result<BatchSnapshots, MarketDataError> {
        let mut results = BatchSnapshots::new();

        for symbol in self.symbols.iter().filter(|s| !is_valid_symbol(s)) {
            debug!("Rejecting invalid symbol '{}'", symbol);
            results.insert(
                symbol.clone(),
                Err(MarketDataError::UnknownTicker(symbol.clone())),
            );
        }

        let valid = self.valid_symbols();
        let chunk_size = self.chunk_size();
        let chunks = valid.chunks(chunk_size);
        debug!(
            "Fetching {} symbols in {} chunk(s) of up to {}",
            valid.len(),
            chunks.len(),
            chunk_size
        );

        for chunk in join_all(chunks.map(|chunk| self.fetch_chunk(chunk))).await {
            results.extend(chunk?);
        }

        Ok(results)
    }

    fn valid_symbols(&self) -> Vec<String> {
        self.symbols
            .iter()
            .filter(|s| is_valid_symbol(s))
            .cloned()
            .collect()
    }

    fn chunk_size(&self) -> usize {
        self.client.provider().max_batch_size().max(1)
    }

    async fn fetch_chunk(&self, chunk: &[String]) -> Result<BatchSnapshots, MarketDataError> {
        let provider = self.client.provider();
        let request = provider.batch_request(chunk);

        let payload = match self.client.session().fetch(&request).await {
            Ok(payload) => payload,
            Err(e) => {
                let error = provider.interpret_error(&chunk.join(","), e);
                if !error.is_missing_data() {
                    return Err(error);
                }
                if chunk.len() > 1 {
                    // One unknown member can fail the whole batch request.
                    warn!(
                        "No batch data for {} ({}), requesting members one by one",
                        chunk.join(","),
                        error
                    );
                    return self.fetch_each(chunk).await;
                }
                warn!("No data for {}: {}", chunk.join(","), error);
                return Ok(chunk
                    .iter()
                    .map(|s| (s.clone(), Err(MarketDataError::UnknownTicker(s.clone()))))
                    .collect());
            }
        };

        let mut snapshots = match provider.parse_batch(chunk, &payload) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                if let MarketDataError::InvalidResponse { .. } = e {
                    self.client.session().evict(&request);
                }
                return Err(e);
            }
        };
        for symbol in chunk {
            snapshots
                .entry(symbol.clone())
                .or_insert_with(|| Err(MarketDataError::UnknownTicker(symbol.clone())));
        }
        Ok(snapshots)
    }

    async fn fetch_each(&self, chunk: &[String]) -> Result<BatchSnapshots, MarketDataError> {
        let fetched = join_all(chunk.iter().map(|s| self.client.snapshot(s))).await;

        let mut snapshots = BatchSnapshots::new();
        for (symbol, result) in chunk.iter().zip(fetched) {
            match result {
                Err(e) if !e.is_missing_data() => return Err(e),
                result => {
                    snapshots.insert(symbol.clone(), result);
                }
            }
        }
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::cache::FileCache;
    use crate::models::{Payload, RequestSpec};
    use crate::provider::yahoo::YahooProvider;
    use crate::session::{CachingSession, HttpTransport, RateLimiter};

    struct UnreachableTransport;

    #[async_trait]
    impl HttpTransport for UnreachableTransport {
        async fn send(&self, request: &RequestSpec) -> Result<Payload, MarketDataError> {
            panic!("unexpected network call: {}", request);
        }
    }

    fn client(dir: &std::path::Path) -> TickerClient {
        let cache = Arc::new(FileCache::open(dir, Duration::from_secs(60)).unwrap());
        let limiter = Arc::new(RateLimiter::new(Duration::ZERO));
        let session = CachingSession::new(cache, limiter, Arc::new(UnreachableTransport));
        TickerClient::new(Arc::new(session), Arc::new(YahooProvider::new()))
    }

    #[test]
    fn test_members_are_normalized_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let tickers = client(dir.path()).batch(["msft", " AAPL ", "MSFT", "aapl", "GOOG"]);

        assert_eq!(tickers.symbols(), &["MSFT", "AAPL", "GOOG"]);
        assert!(tickers.contains("goog"));
        assert!(!tickers.contains("TSLA"));
    }

    #[tokio::test]
    async fn test_non_member_is_unknown_ticker() {
        let dir = tempfile::tempdir().unwrap();
        let tickers = client(dir.path()).batch(["AAPL"]);

        let result = tickers.snapshot("tsla").await;
        assert!(matches!(result, Err(MarketDataError::UnknownTicker(s)) if s == "TSLA"));
    }

    #[tokio::test]
    async fn test_invalid_members_never_reach_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let tickers = client(dir.path()).batch(["NOT A TICKER", ""]);

        let results = tickers.fetch_all().await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results
            .values()
            .all(|r| matches!(r, Err(MarketDataError::UnknownTicker(_)))));
    }
}
