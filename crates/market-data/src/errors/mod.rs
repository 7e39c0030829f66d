//! Error types for the market data crate.
//!
//! [`MarketDataError`] is the single error type returned by sessions, providers
//! and snapshot accessors. Callers that aggregate many instruments use
//! [`MarketDataError::is_missing_data`] to decide whether a failure is local to
//! one symbol (skip it) or affects the whole request (abort).

use thiserror::Error;

use crate::cache::CacheError;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider has no data for the requested symbol, or the symbol
    /// is not syntactically valid. Retrying won't help.
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// The snapshot for a symbol does not carry the requested attribute.
    #[error("Unknown attribute '{attribute}' for {symbol}")]
    UnknownAttribute {
        /// The symbol whose snapshot was inspected
        symbol: String,
        /// The attribute that was requested
        attribute: String,
    },

    /// The provider is throttling us or failing server-side.
    #[error("Provider unavailable: {provider} - {message}")]
    ProviderUnavailable {
        /// The provider that failed
        provider: String,
        /// What the provider reported
        message: String,
    },

    /// The provider answered with a payload we could not interpret.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the payload
        provider: String,
        /// Why the payload was rejected
        message: String,
    },

    /// A non-success HTTP status, before any provider-specific interpretation.
    #[error("Unexpected status {status} for {url}")]
    HttpStatus {
        /// The HTTP status code
        status: u16,
        /// The request URL
        url: String,
    },

    /// The persistent cache could not be opened.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether this error only concerns the data of a single symbol.
    ///
    /// Such errors are recoverable when valuing many instruments at once: the
    /// affected symbol is skipped and the rest of the pass proceeds. Everything
    /// else (transport, provider outages, unreadable payloads) aborts the pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use fincli_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::UnknownTicker("BADTICKER".to_string());
    /// assert!(error.is_missing_data());
    ///
    /// let error = MarketDataError::ProviderUnavailable {
    ///     provider: "YAHOO".to_string(),
    ///     message: "503".to_string(),
    /// };
    /// assert!(!error.is_missing_data());
    /// ```
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            Self::UnknownTicker(_) | Self::UnknownAttribute { .. }
        )
    }
}
