use serde::{Deserialize, Serialize};

/// One row of the portfolio file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    pub ticker: String,
    pub shares: u64,
}

impl Holding {
    pub fn new(ticker: impl Into<String>, shares: u64) -> Self {
        Self {
            ticker: ticker.into(),
            shares,
        }
    }
}
