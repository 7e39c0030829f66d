//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider rate limiting configuration
//! - The Yahoo Finance implementation
//!
//! Providers never touch the network themselves. They describe requests
//! ([`RequestSpec`](crate::models::RequestSpec)) and interpret payloads; the
//! [`CachingSession`](crate::session::CachingSession) performs the calls, so
//! every provider request is cached and rate limited the same way.

mod capabilities;
mod traits;

pub mod yahoo;

// Re-exports
pub use capabilities::RateLimit;
pub use traits::{BatchSnapshots, MarketDataProvider};
