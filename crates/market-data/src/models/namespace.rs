use std::path::PathBuf;
use std::time::Duration;

/// Logical audience of a cache.
///
/// Single-instrument lookups and portfolio batch lookups tolerate different
/// staleness, so each gets its own directory and TTL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Ticker,
    Portfolio,
}

impl CacheNamespace {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CacheNamespace::Ticker => "fincli_ticker",
            CacheNamespace::Portfolio => "fincli_portfolio",
        }
    }

    pub fn default_ttl(&self) -> Duration {
        match self {
            CacheNamespace::Ticker => Duration::from_secs(300),
            CacheNamespace::Portfolio => Duration::from_secs(419),
        }
    }

    /// Default on-disk location, under the system temp directory.
    pub fn default_dir(&self) -> PathBuf {
        std::env::temp_dir().join(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_are_distinct() {
        assert_ne!(
            CacheNamespace::Ticker.default_dir(),
            CacheNamespace::Portfolio.default_dir()
        );
        assert_eq!(CacheNamespace::Ticker.default_ttl(), Duration::from_secs(300));
        assert_eq!(
            CacheNamespace::Portfolio.default_ttl(),
            Duration::from_secs(419)
        );
    }
}
