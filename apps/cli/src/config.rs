use std::path::PathBuf;
use std::time::Duration;

use fincli_market_data::{attributes, CacheNamespace};

pub struct Config {
    pub ticker_cache_dir: PathBuf,
    pub portfolio_cache_dir: PathBuf,
    pub ticker_ttl: Duration,
    pub portfolio_ttl: Duration,
    /// Overrides the provider's own rate limit when set.
    pub min_interval: Option<Duration>,
    pub http_timeout: Duration,
    pub default_attribute: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str, namespace: CacheNamespace| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| namespace.default_dir())
        };
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let ticker_ttl_secs = number("FINCLI_TICKER_TTL_SECS")
            .unwrap_or(CacheNamespace::Ticker.default_ttl().as_secs());
        let portfolio_ttl_secs = number("FINCLI_PORTFOLIO_TTL_SECS")
            .unwrap_or(CacheNamespace::Portfolio.default_ttl().as_secs());
        let timeout_ms = number("FINCLI_HTTP_TIMEOUT_MS").unwrap_or(10_000);

        Self {
            ticker_cache_dir: dir("FINCLI_TICKER_CACHE_DIR", CacheNamespace::Ticker),
            portfolio_cache_dir: dir("FINCLI_PORTFOLIO_CACHE_DIR", CacheNamespace::Portfolio),
            ticker_ttl: Duration::from_secs(ticker_ttl_secs),
            portfolio_ttl: Duration::from_secs(portfolio_ttl_secs),
            min_interval: number("FINCLI_MIN_INTERVAL_MS").map(Duration::from_millis),
            http_timeout: Duration::from_millis(timeout_ms),
            default_attribute: lookup("FINCLI_DEFAULT_ATTRIBUTE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| attributes::LAST_PRICE.to_string()),
        }
    }

    pub fn cache_dir(&self, namespace: CacheNamespace) -> &PathBuf {
        match namespace {
            CacheNamespace::Ticker => &self.ticker_cache_dir,
            CacheNamespace::Portfolio => &self.portfolio_cache_dir,
        }
    }

    pub fn ttl(&self, namespace: CacheNamespace) -> Duration {
        match namespace {
            CacheNamespace::Ticker => self.ticker_ttl,
            CacheNamespace::Portfolio => self.portfolio_ttl,
        }
    }
}
