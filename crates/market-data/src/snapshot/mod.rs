//! Snapshot accessors.
//!
//! [`TickerClient`] reads one instrument at a time. [`Tickers`] covers a fixed
//! set of instruments and fetches them in provider-sized batches. Both go
//! through a [`CachingSession`](crate::session::CachingSession) for every
//! network-bound call.

mod ticker;
mod tickers;

pub use ticker::TickerClient;
pub use tickers::Tickers;
