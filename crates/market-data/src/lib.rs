//! FinCLI Market Data Crate
//!
//! Rate-limited, persistently cached access to a price provider.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  TickerClient /  | --> |    Provider      |  (builds requests, parses payloads)
//! |     Tickers      |     +------------------+
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  CachingSession  | --> |    FileCache     |  (hit: return, no admission)
//! +------------------+     +------------------+
//!          | miss
//!          v
//! +------------------+     +------------------+
//! |   RateLimiter    | --> |  HttpTransport   |  (reqwest)
//! +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RequestSpec`] - Outbound request, the source of its [`CacheKey`]
//! - [`FileCache`] - Filesystem-backed TTL cache, one directory per namespace
//! - [`RateLimiter`] - Minimum spacing between network calls
//! - [`CachingSession`] - Cache, limiter and transport composed
//! - [`PriceSnapshot`] - Attribute map of one instrument
//! - [`TickerClient`] / [`Tickers`] - Single and batch snapshot accessors
//! - [`MarketDataProvider`] - Provider adapter trait ([`YahooProvider`])

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;
pub mod session;
pub mod snapshot;

pub use cache::{CacheEntry, CacheError, CacheKey, FileCache};
pub use errors::MarketDataError;
pub use models::{
    attributes, is_valid_symbol, normalize_symbol, CacheNamespace, HttpMethod, Payload,
    PriceSnapshot, RequestSpec,
};
pub use provider::yahoo::YahooProvider;
pub use provider::{BatchSnapshots, MarketDataProvider, RateLimit};
pub use session::{
    CachePolicy, CachingSession, HttpTransport, RateLimiter, ReqwestTransport, SessionStats,
};
pub use snapshot::{TickerClient, Tickers};
