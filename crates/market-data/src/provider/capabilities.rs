//! Provider rate limiting configuration.

use std::time::Duration;

/// How often a provider may be called.
///
/// Expressed the way providers document it ("N requests per period") and
/// turned into the minimum spacing enforced by the session's
/// [`RateLimiter`](crate::session::RateLimiter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per period.
    pub requests: u32,

    /// Length of the period.
    pub per: Duration,
}

impl RateLimit {
    /// Minimum delay between two consecutive requests.
    pub fn min_interval(&self) -> Duration {
        self.per / self.requests.max(1)
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests: 1,
            per: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_interval() {
        assert_eq!(RateLimit::default().min_interval(), Duration::from_secs(3));

        let rate_limit = RateLimit {
            requests: 2000,
            per: Duration::from_secs(60),
        };
        assert_eq!(rate_limit.min_interval(), Duration::from_millis(30));
    }
}
