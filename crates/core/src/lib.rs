//! FinCLI Core - Portfolio loading and valuation.
//!
//! Market data access lives in `fincli-market-data`; this crate turns a
//! portfolio file into priced entries on top of it.

pub mod constants;
pub mod errors;
pub mod portfolio;

pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
