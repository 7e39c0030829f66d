//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases (Payload)
//! - `request` - Outbound request description (RequestSpec, HttpMethod)
//! - `snapshot` - Point-in-time attribute map for one instrument (PriceSnapshot)
//! - `symbol` - Symbol normalization and validation
//! - `namespace` - Cache namespaces with their default TTLs (CacheNamespace)

mod namespace;
mod request;
mod snapshot;
mod symbol;
mod types;

pub use namespace::CacheNamespace;
pub use request::{HttpMethod, RequestSpec};
pub use snapshot::{attributes, PriceSnapshot};
pub use symbol::{is_valid_symbol, normalize_symbol};
pub use types::Payload;
