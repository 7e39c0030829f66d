//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Valued holding, or the aggregate of all valued holdings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub ticker: String,
    pub shares: u64,
    /// `shares × lastPrice`, rounded to cents
    pub price: Decimal,
    /// `shares × previousClose`, rounded to cents
    pub previous_close: Decimal,
    /// Percent change from the previous close. `None` when the previous
    /// close is zero.
    pub change_pct: Option<Decimal>,
    /// Quote currency. On the aggregate row, set only when every valued
    /// holding shares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValuationMode {
    #[default]
    PerEntry,
    TotalOnly,
}

/// A holding left out of the valuation because its ticker has no usable data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedHolding {
    pub ticker: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    /// Valued holdings in input order, or the single aggregate row.
    pub entries: Vec<PortfolioEntry>,
    pub skipped: Vec<SkippedHolding>,
    /// Distinct currencies of the valued holdings, sorted.
    pub currencies: Vec<String>,
}

impl ValuationReport {
    /// Whether the valued holdings are quoted in more than one currency.
    pub fn is_multi_currency(&self) -> bool {
        self.currencies.len() > 1
    }
}
