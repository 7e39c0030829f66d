//! Minimum-spacing rate limiter for outbound provider calls.
//!
//! Every network-bound request of a session passes through [`RateLimiter::admit`].
//! Admissions are spaced at least `min_interval` apart. The state lives behind a
//! `tokio::sync::Mutex`, whose waiters are woken in FIFO order, and the guard is
//! held while sleeping, so concurrent callers are admitted one at a time in
//! arrival order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default spacing: one request every 3 seconds.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct LimiterState {
    /// When the previous call was let through.
    last_admitted_at: Option<Instant>,
}

/// Rate limiter shared by all requests of one provider session.
#[derive(Debug)]
pub struct RateLimiter {
    state: Mutex<LimiterState>,
    min_interval: Duration,
    admissions: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter that spaces admissions at least `min_interval` apart.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(LimiterState::default()),
            min_interval,
            admissions: AtomicU64::new(0),
        }
    }

    /// Create a limiter from an "N requests per period" rate.
    ///
    /// A rate of zero requests is treated as one.
    pub fn from_rate(requests: u32, per: Duration) -> Self {
        Self::new(per / requests.max(1))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Number of calls admitted so far.
    pub fn admissions(&self) -> u64 {
        self.admissions.load(Ordering::SeqCst)
    }

    /// Instant of the most recent admission, if any.
    pub async fn last_admitted_at(&self) -> Option<Instant> {
        self.state.lock().await.last_admitted_at
    }

    /// Wait until the next call may proceed.
    ///
    /// The first admission is immediate. Never fails, only delays.
    pub async fn admit(&self) {
        let mut state = self.state.lock().await;

        if let Some(last) = state.last_admitted_at {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                debug!("Rate limiter: waiting {:?}", ready_at - now);
                tokio::time::sleep_until(ready_at).await;
            }
        }

        state.last_admitted_at = Some(Instant::now());
        let count = self.admissions.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Rate limiter: admission #{}", count);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_from_rate() {
        let limiter = RateLimiter::from_rate(1, Duration::from_secs(3));
        assert_eq!(limiter.min_interval(), Duration::from_secs(3));

        let limiter = RateLimiter::from_rate(4, Duration::from_secs(1));
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));

        let limiter = RateLimiter::from_rate(0, Duration::from_secs(2));
        assert_eq!(limiter.min_interval(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_admission_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(3));
        let start = Instant::now();

        limiter.admit().await;

        assert_eq!(Instant::now(), start);
        assert_eq!(limiter.admissions(), 1);
        assert_eq!(limiter.last_admitted_at().await, Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_admissions_are_spaced() {
        let min_interval = Duration::from_secs(3);
        let limiter = RateLimiter::new(min_interval);

        let mut admitted = Vec::new();
        for _ in 0..5 {
            limiter.admit().await;
            admitted.push(Instant::now());
        }

        for pair in admitted.windows(2) {
            assert!(pair[1] - pair[0] >= min_interval);
        }
        assert_eq!(limiter.admissions(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_idle_period() {
        let limiter = RateLimiter::new(Duration::from_secs(3));
        limiter.admit().await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        let before = Instant::now();
        limiter.admit().await;

        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized() {
        let min_interval = Duration::from_millis(500);
        let limiter = Arc::new(RateLimiter::new(min_interval));
        let start = Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    limiter.admit().await;
                    Instant::now()
                })
            })
            .collect();

        let mut admitted = Vec::new();
        for handle in handles {
            admitted.push(handle.await.unwrap());
        }
        admitted.sort();

        for pair in admitted.windows(2) {
            assert!(pair[1] - pair[0] >= min_interval);
        }
        assert!(admitted[3] - start >= min_interval * 3);
        assert_eq!(limiter.admissions(), 4);
    }
}
