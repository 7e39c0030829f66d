//! Request session layer.
//!
//! This module provides:
//! - [`RateLimiter`]: minimum spacing between outbound calls
//! - [`HttpTransport`] / [`ReqwestTransport`]: the network call itself
//! - [`CachingSession`]: composition of the persistent cache, the limiter and
//!   the transport

mod caching_session;
mod rate_limiter;
mod transport;

pub use caching_session::{CachePolicy, CachingSession, SessionStats};
pub use rate_limiter::RateLimiter;
pub use transport::{HttpTransport, ReqwestTransport};
