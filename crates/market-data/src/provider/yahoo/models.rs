//! Yahoo Finance API response models.
//!
//! Only the `meta` block of chart results is read. It carries the current
//! price, the previous close and day/year ranges, which is all a snapshot
//! needs. The spark endpoint wraps the same chart results per symbol.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::models::attributes;

/// Response of `/v8/finance/chart/{symbol}`
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

#[derive(Debug, Deserialize)]
pub struct YahooChart {
    #[serde(default)]
    pub result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: YahooChartMeta,
}

/// Error object Yahoo embeds in otherwise well-formed responses
#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl YahooApiError {
    pub fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{}: {}", code, description),
            (Some(code), None) => code.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => "unspecified error".to_string(),
        }
    }
}

/// Chart metadata
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub instrument_type: Option<String>,
    pub exchange_timezone_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub regular_market_open: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_volume: Option<i64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

impl YahooChartMeta {
    /// Snapshot attributes carried by this meta block. Absent values are
    /// left out rather than stored as null.
    pub fn to_fields(&self) -> BTreeMap<String, Value> {
        let mut fields = BTreeMap::new();

        let numbers = [
            (attributes::LAST_PRICE, self.regular_market_price),
            (
                attributes::PREVIOUS_CLOSE,
                self.previous_close.or(self.chart_previous_close),
            ),
            (attributes::OPEN, self.regular_market_open),
            (attributes::DAY_HIGH, self.regular_market_day_high),
            (attributes::DAY_LOW, self.regular_market_day_low),
            (attributes::YEAR_HIGH, self.fifty_two_week_high),
            (attributes::YEAR_LOW, self.fifty_two_week_low),
        ];
        for (name, value) in numbers {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                fields.insert(name.to_string(), Value::from(v));
            }
        }

        if let Some(volume) = self.regular_market_volume {
            fields.insert(attributes::LAST_VOLUME.to_string(), Value::from(volume));
        }

        let texts = [
            (attributes::CURRENCY, &self.currency),
            (attributes::EXCHANGE, &self.exchange_name),
            (attributes::QUOTE_TYPE, &self.instrument_type),
            (attributes::TIMEZONE, &self.exchange_timezone_name),
        ];
        for (name, value) in texts {
            if let Some(v) = value {
                fields.insert(name.to_string(), Value::from(v.as_str()));
            }
        }

        fields
    }
}

/// Response of `/v7/finance/spark?symbols=...`
#[derive(Debug, Deserialize)]
pub struct YahooSparkResponse {
    pub spark: YahooSpark,
}

#[derive(Debug, Deserialize)]
pub struct YahooSpark {
    #[serde(default)]
    pub result: Option<Vec<YahooSparkResult>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
pub struct YahooSparkResult {
    pub symbol: String,
    #[serde(default)]
    pub response: Vec<YahooChartResult>,
}
