//! Yahoo Finance market data provider.
//!
//! Snapshots come from the public chart endpoint (one symbol per request).
//! Batches use the spark endpoint, which returns the same chart metadata for
//! up to 20 symbols in one request.

mod models;

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{normalize_symbol, PriceSnapshot, RequestSpec};
use crate::provider::{BatchSnapshots, MarketDataProvider, RateLimit};

use models::{YahooChartResponse, YahooChartResult, YahooSparkResponse};

const PROVIDER_ID: &str = "YAHOO";

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Symbols per spark request.
const MAX_SPARK_SYMBOLS: usize = 20;

/// Yahoo Finance market data provider.
#[derive(Clone, Debug)]
pub struct YahooProvider {
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at another host (mirror, proxy, test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn invalid_response(message: impl Into<String>) -> MarketDataError {
        MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: message.into(),
        }
    }

    /// Turn the first chart result into a snapshot.
    fn snapshot_from_results(
        symbol: &str,
        results: Option<Vec<YahooChartResult>>,
    ) -> Result<PriceSnapshot, MarketDataError> {
        let result = results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| MarketDataError::UnknownTicker(symbol.to_string()))?;

        let fields = result.meta.to_fields();
        if fields.is_empty() {
            return Err(MarketDataError::UnknownTicker(symbol.to_string()));
        }
        Ok(PriceSnapshot::new(symbol, fields))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests: 1,
            per: Duration::from_secs(3),
        }
    }

    fn snapshot_request(&self, symbol: &str) -> RequestSpec {
        RequestSpec::get(format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            encode(symbol)
        ))
        .param("range", "1d")
        .param("interval", "1d")
    }

    fn parse_snapshot(&self, symbol: &str, payload: &[u8]) -> Result<PriceSnapshot, MarketDataError> {
        let response: YahooChartResponse = serde_json::from_slice(payload)
            .map_err(|e| Self::invalid_response(format!("Failed to parse chart response: {}", e)))?;

        if let Some(error) = response.chart.error {
            debug!("Yahoo chart error for {}: {}", symbol, error.message());
            return Err(MarketDataError::UnknownTicker(symbol.to_string()));
        }

        Self::snapshot_from_results(symbol, response.chart.result)
    }

    fn max_batch_size(&self) -> usize {
        MAX_SPARK_SYMBOLS
    }

    fn batch_request(&self, symbols: &[String]) -> RequestSpec {
        RequestSpec::get(format!("{}/v7/finance/spark", self.base_url))
            .param("symbols", symbols.join(","))
            .param("range", "1d")
            .param("interval", "1d")
    }

    fn parse_batch(
        &self,
        symbols: &[String],
        payload: &[u8],
    ) -> Result<BatchSnapshots, MarketDataError> {
        let response: YahooSparkResponse = serde_json::from_slice(payload)
            .map_err(|e| Self::invalid_response(format!("Failed to parse spark response: {}", e)))?;

        if let Some(error) = &response.spark.error {
            warn!("Yahoo spark error for {:?}: {}", symbols, error.message());
        }

        let mut by_symbol: HashMap<String, Vec<YahooChartResult>> = response
            .spark
            .result
            .unwrap_or_default()
            .into_iter()
            .map(|r| (normalize_symbol(&r.symbol), r.response))
            .collect();

        Ok(symbols
            .iter()
            .map(|s| {
                let symbol = normalize_symbol(s);
                let snapshot = Self::snapshot_from_results(&symbol, by_symbol.remove(&symbol));
                (symbol, snapshot)
            })
            .collect())
    }

    fn interpret_error(&self, symbol: &str, error: MarketDataError) -> MarketDataError {
        match error {
            MarketDataError::HttpStatus { status: 404, .. } => {
                MarketDataError::UnknownTicker(symbol.to_string())
            }
            MarketDataError::HttpStatus { status, url } if status == 429 || status >= 500 => {
                MarketDataError::ProviderUnavailable {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {} for {}", status, url),
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const AAPL_CHART: &str = r#"{
        "chart": {
            "result": [{"meta": {
                "symbol": "AAPL",
                "currency": "USD",
                "regularMarketPrice": 189.84,
                "previousClose": 187.15
            }}],
            "error": null
        }
    }"#;

    #[test]
    fn test_snapshot_request() {
        let provider = YahooProvider::with_base_url("https://example.com/");
        let request = provider.snapshot_request("BRK.B");

        assert_eq!(request.url, "https://example.com/v8/finance/chart/BRK.B");
        assert_eq!(request.params.get("range").map(String::as_str), Some("1d"));
        assert_eq!(request.params.get("interval").map(String::as_str), Some("1d"));
    }

    #[test]
    fn test_snapshot_request_encodes_symbol() {
        let provider = YahooProvider::new();
        let request = provider.snapshot_request("^GSPC");
        assert!(request.url.ends_with("/v8/finance/chart/%5EGSPC"));
    }

    #[test]
    fn test_parse_snapshot() {
        let provider = YahooProvider::new();
        let snapshot = provider.parse_snapshot("AAPL", AAPL_CHART.as_bytes()).unwrap();

        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.last_price().unwrap(), dec!(189.84));
        assert_eq!(snapshot.previous_close().unwrap(), dec!(187.15));
        assert_eq!(snapshot.currency(), Some("USD"));
    }

    #[test]
    fn test_parse_snapshot_unknown_ticker() {
        let provider = YahooProvider::new();

        let with_error = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}}"#;
        assert!(matches!(
            provider.parse_snapshot("NOPE", with_error.as_bytes()),
            Err(MarketDataError::UnknownTicker(s)) if s == "NOPE"
        ));

        let empty = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(matches!(
            provider.parse_snapshot("NOPE", empty.as_bytes()),
            Err(MarketDataError::UnknownTicker(_))
        ));
    }

    #[test]
    fn test_parse_snapshot_garbage_is_invalid_response() {
        let provider = YahooProvider::new();
        assert!(matches!(
            provider.parse_snapshot("AAPL", b"<html>"),
            Err(MarketDataError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_batch_request() {
        let provider = YahooProvider::new();
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let request = provider.batch_request(&symbols);

        assert!(request.url.ends_with("/v7/finance/spark"));
        assert_eq!(
            request.params.get("symbols").map(String::as_str),
            Some("AAPL,MSFT")
        );
        assert_eq!(provider.max_batch_size(), 20);
    }

    #[test]
    fn test_parse_batch_marks_missing_symbols_unknown() {
        let provider = YahooProvider::new();
        let payload = r#"{
            "spark": {
                "result": [
                    {"symbol": "AAPL", "response": [{"meta": {"regularMarketPrice": 189.84, "chartPreviousClose": 187.15}}]},
                    {"symbol": "BADTICKER", "response": []}
                ],
                "error": null
            }
        }"#;
        let symbols = vec![
            "AAPL".to_string(),
            "BADTICKER".to_string(),
            "MSFT".to_string(),
        ];

        let results = provider.parse_batch(&symbols, payload.as_bytes()).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(
            results["AAPL"].as_ref().unwrap().last_price().unwrap(),
            dec!(189.84)
        );
        assert!(matches!(
            results["BADTICKER"],
            Err(MarketDataError::UnknownTicker(_))
        ));
        assert!(matches!(
            results["MSFT"],
            Err(MarketDataError::UnknownTicker(_))
        ));
    }

    #[test]
    fn test_interpret_error() {
        let provider = YahooProvider::new();

        let not_found = MarketDataError::HttpStatus {
            status: 404,
            url: "u".to_string(),
        };
        assert!(matches!(
            provider.interpret_error("NOPE", not_found),
            MarketDataError::UnknownTicker(s) if s == "NOPE"
        ));

        let throttled = MarketDataError::HttpStatus {
            status: 429,
            url: "u".to_string(),
        };
        assert!(matches!(
            provider.interpret_error("AAPL", throttled),
            MarketDataError::ProviderUnavailable { .. }
        ));

        let bad_request = MarketDataError::HttpStatus {
            status: 400,
            url: "u".to_string(),
        };
        assert!(matches!(
            provider.interpret_error("AAPL", bad_request),
            MarketDataError::HttpStatus { status: 400, .. }
        ));
    }

    #[test]
    fn test_rate_limit() {
        let provider = YahooProvider::new();
        assert_eq!(provider.rate_limit().min_interval(), Duration::from_secs(3));
    }
}
