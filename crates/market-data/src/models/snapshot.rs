use std::collections::BTreeMap;
use std::str::FromStr;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MarketDataError;

/// Well-known snapshot attribute names.
pub mod attributes {
    pub const LAST_PRICE: &str = "lastPrice";
    pub const PREVIOUS_CLOSE: &str = "previousClose";
    pub const CURRENCY: &str = "currency";
    pub const OPEN: &str = "open";
    pub const DAY_HIGH: &str = "dayHigh";
    pub const DAY_LOW: &str = "dayLow";
    pub const LAST_VOLUME: &str = "lastVolume";
    pub const YEAR_HIGH: &str = "yearHigh";
    pub const YEAR_LOW: &str = "yearLow";
    pub const EXCHANGE: &str = "exchange";
    pub const QUOTE_TYPE: &str = "quoteType";
    pub const TIMEZONE: &str = "timezone";
}

/// Point-in-time set of named attributes for one instrument.
///
/// Values are scalar JSON values (numbers or strings). A snapshot is never
/// mutated after construction; a new fetch produces a new snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub symbol: String,
    pub fields: BTreeMap<String, Value>,
}

impl PriceSnapshot {
    pub fn new(symbol: impl Into<String>, fields: BTreeMap<String, Value>) -> Self {
        Self {
            symbol: symbol.into(),
            fields,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Look up an attribute, failing with `UnknownAttribute` when absent.
    pub fn attribute(&self, name: &str) -> Result<&Value, MarketDataError> {
        self.fields
            .get(name)
            .ok_or_else(|| MarketDataError::UnknownAttribute {
                symbol: self.symbol.clone(),
                attribute: name.to_string(),
            })
    }

    /// Read a numeric attribute as a `Decimal`.
    ///
    /// Floats go through `Decimal::from_f64`, which drops the binary noise of
    /// the float representation (5.005 stays 5.005). Numeric strings are
    /// parsed as decimals.
    pub fn decimal(&self, name: &str) -> Result<Decimal, MarketDataError> {
        let value = self.attribute(name)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .map(Decimal::from)
                .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| MarketDataError::UnknownAttribute {
            symbol: self.symbol.clone(),
            attribute: name.to_string(),
        })
    }

    pub fn last_price(&self) -> Result<Decimal, MarketDataError> {
        self.decimal(attributes::LAST_PRICE)
    }

    pub fn previous_close(&self) -> Result<Decimal, MarketDataError> {
        self.decimal(attributes::PREVIOUS_CLOSE)
    }

    pub fn currency(&self) -> Option<&str> {
        self.get(attributes::CURRENCY).and_then(Value::as_str)
    }
}
