//! Core error types for FinCLI.

use std::path::PathBuf;

use fincli_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for portfolio operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Portfolio file not found: {}", .0.display())]
    PortfolioFileNotFound(PathBuf),

    #[error("Invalid portfolio: {0}")]
    InvalidPortfolioSchema(String),

    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::InvalidPortfolioSchema(message.into())
    }
}
