use std::time::Instant;

use async_trait::async_trait;
use fincli_market_data::{normalize_symbol, TickerClient};
use log::{debug, warn};

use super::{
    aggregate, currencies, value_holding, SkippedHolding, ValuationMode, ValuationReport,
    ValuationServiceTrait,
};
use crate::errors::{Error, Result};
use crate::portfolio::holdings::Holding;

/// Values portfolios from one batch snapshot pass per call.
#[derive(Clone)]
pub struct ValuationService {
    client: TickerClient,
}

impl ValuationService {
    pub fn new(client: TickerClient) -> Self {
        Self { client }
    }

    fn validate(holdings: &[Holding]) -> Result<()> {
        if holdings.is_empty() {
            return Err(Error::InvalidPortfolioSchema(
                "portfolio is empty".to_string(),
            ));
        }
        if let Some(index) = holdings.iter().position(|h| h.ticker.trim().is_empty()) {
            return Err(Error::InvalidPortfolioSchema(format!(
                "entry {}: ticker is blank",
                index
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn valuate(&self, holdings: &[Holding], mode: ValuationMode) -> Result<ValuationReport> {
        Self::validate(holdings)?;

        let started = Instant::now();
        let tickers = self.client.batch(holdings.iter().map(|h| h.ticker.as_str()));
        let mut snapshots = tickers.fetch_all().await?;

        // Only per-symbol data gaps are tolerated; anything else fails the pass.
        if let Some(symbol) = snapshots
            .iter()
            .find(|(_, r)| matches!(r, Err(e) if !e.is_missing_data()))
            .map(|(symbol, _)| symbol.clone())
        {
            if let Some(Err(e)) = snapshots.remove(&symbol) {
                return Err(e.into());
            }
        }

        let mut report = ValuationReport::default();
        for holding in holdings {
            let symbol = normalize_symbol(&holding.ticker);
            let valued = match snapshots.get(&symbol) {
                Some(Ok(snapshot)) => value_holding(holding, snapshot),
                Some(Err(e)) => {
                    skip(&mut report, &symbol, e.to_string());
                    continue;
                }
                None => {
                    skip(&mut report, &symbol, format!("No data for {}", symbol));
                    continue;
                }
            };

            match valued {
                Ok(entry) => report.entries.push(entry),
                Err(Error::MarketData(e)) if e.is_missing_data() => {
                    skip(&mut report, &symbol, e.to_string())
                }
                Err(e) => return Err(e),
            }
        }
        report.currencies = currencies(&report.entries);

        debug!(
            "Valued {} of {} holdings in {:?}",
            report.entries.len(),
            holdings.len(),
            started.elapsed()
        );

        if mode == ValuationMode::TotalOnly {
            if report.is_multi_currency() {
                warn!(
                    "Total sums holdings quoted in {} without conversion",
                    report.currencies.join(", ")
                );
            }
            report.entries = vec![aggregate(&report.entries)?];
        }

        Ok(report)
    }
}

fn skip(report: &mut ValuationReport, ticker: &str, reason: String) {
    warn!("Skipping {}: {}", ticker, reason);
    report.skipped.push(SkippedHolding {
        ticker: ticker.to_string(),
        reason,
    });
}
