use std::collections::BTreeSet;

use fincli_market_data::{normalize_symbol, PriceSnapshot};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{AGGREGATE_TICKER, DISPLAY_DECIMAL_PRECISION};
use crate::errors::{Error, Result};
use crate::portfolio::holdings::Holding;
use crate::portfolio::valuation::PortfolioEntry;

/// Round to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// `((price / previous_close) - 1) × 100`, rounded like money.
///
/// Returns `None` when `previous_close` is zero or the ratio is out of range.
pub fn change_pct(price: Decimal, previous_close: Decimal) -> Option<Decimal> {
    if previous_close.is_zero() {
        return None;
    }
    price
        .checked_div(previous_close)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round_money)
}

/// Value one holding from its snapshot.
///
/// Fails with `UnknownAttribute` when the snapshot lacks `lastPrice` or
/// `previousClose`, and with `ValueOutOfRange` when `shares × price` does not
/// fit a `Decimal`.
pub fn value_holding(holding: &Holding, snapshot: &PriceSnapshot) -> Result<PortfolioEntry> {
    let ticker = normalize_symbol(&holding.ticker);
    let shares = Decimal::from(holding.shares);
    let price = round_money(multiply(&ticker, shares, snapshot.last_price()?)?);
    let previous_close = round_money(multiply(&ticker, shares, snapshot.previous_close()?)?);

    Ok(PortfolioEntry {
        ticker,
        shares: holding.shares,
        price,
        previous_close,
        change_pct: change_pct(price, previous_close),
        currency: snapshot.currency().map(str::to_string),
    })
}

fn multiply(ticker: &str, shares: Decimal, amount: Decimal) -> Result<Decimal> {
    shares.checked_mul(amount).ok_or_else(|| {
        Error::ValueOutOfRange(format!("{} shares of {} at {}", shares, ticker, amount))
    })
}

/// Single aggregate row over `entries`.
///
/// The change is computed on the summed values, not averaged. An empty slice
/// yields zeros and no change. The currency is kept only when all entries
/// share it.
pub fn aggregate(entries: &[PortfolioEntry]) -> Result<PortfolioEntry> {
    let (price, previous_close) = entries.iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(price, previous_close), e| {
            match (
                price.checked_add(e.price),
                previous_close.checked_add(e.previous_close),
            ) {
                (Some(price), Some(previous_close)) => Ok((price, previous_close)),
                _ => Err(Error::ValueOutOfRange(format!(
                    "portfolio total after {}",
                    e.ticker
                ))),
            }
        },
    )?;

    let currencies = currencies(entries);
    let currency = match currencies.as_slice() {
        [only] if entries.iter().all(|e| e.currency.is_some()) => Some(only.clone()),
        _ => None,
    };

    Ok(PortfolioEntry {
        ticker: AGGREGATE_TICKER.to_string(),
        shares: 0,
        price,
        previous_close,
        change_pct: change_pct(price, previous_close),
        currency,
    })
}

/// Distinct currencies quoted by `entries`, sorted.
pub fn currencies(entries: &[PortfolioEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.currency.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincli_market_data::MarketDataError;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    fn snapshot(symbol: &str, fields: Value) -> PriceSnapshot {
        let fields = fields
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        PriceSnapshot::new(symbol, fields)
    }

    fn entry(price: Decimal, previous_close: Decimal) -> PortfolioEntry {
        PortfolioEntry {
            ticker: "X".to_string(),
            shares: 1,
            price,
            previous_close,
            change_pct: change_pct(price, previous_close),
            currency: Some("USD".to_string()),
        }
    }

    fn quoted_in(currency: Option<&str>, price: Decimal) -> PortfolioEntry {
        PortfolioEntry {
            currency: currency.map(str::to_string),
            ..entry(price, price)
        }
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(25.125)), dec!(25.13));
        assert_eq!(round_money(dec!(25.124)), dec!(25.12));
        assert_eq!(round_money(dec!(-25.125)), dec!(-25.13));
        assert_eq!(round_money(dec!(50.05)), dec!(50.05));
    }

    #[test]
    fn test_value_holding() {
        let snap = snapshot("X", json!({"lastPrice": 5.005, "previousClose": 4.0}));
        let valued = value_holding(&Holding::new("x", 10), &snap).unwrap();

        assert_eq!(valued.ticker, "X");
        assert_eq!(valued.price, dec!(50.05));
        assert_eq!(valued.previous_close, dec!(40.00));
        assert_eq!(valued.change_pct, Some(dec!(25.13)));
    }

    #[test]
    fn test_value_holding_zero_previous_close() {
        let snap = snapshot("X", json!({"lastPrice": 3.0, "previousClose": 0}));
        let valued = value_holding(&Holding::new("X", 10), &snap).unwrap();

        assert_eq!(valued.price, dec!(30));
        assert_eq!(valued.change_pct, None);
    }

    #[test]
    fn test_value_holding_missing_price() {
        let snap = snapshot("X", json!({"previousClose": 4.0}));
        let result = value_holding(&Holding::new("X", 1), &snap);

        assert!(matches!(
            result,
            Err(Error::MarketData(MarketDataError::UnknownAttribute { .. }))
        ));
    }

    #[test]
    fn test_value_holding_out_of_range() {
        let snap = snapshot("X", json!({"lastPrice": 1e10, "previousClose": 1.0}));
        let result = value_holding(&Holding::new("X", u64::MAX), &snap);

        assert!(matches!(result, Err(Error::ValueOutOfRange(_))));
    }

    #[test]
    fn test_value_holding_carries_currency() {
        let snap = snapshot(
            "SAP.DE",
            json!({"lastPrice": 1.0, "previousClose": 1.0, "currency": "EUR"}),
        );
        let valued = value_holding(&Holding::new("sap.de", 1), &snap).unwrap();
        assert_eq!(valued.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_aggregate_uses_summed_values() {
        let total = aggregate(&[entry(dec!(110), dec!(100)), entry(dec!(45), dec!(50))]).unwrap();

        assert_eq!(total.ticker, "Portfolio");
        assert_eq!(total.shares, 0);
        assert_eq!(total.price, dec!(155));
        assert_eq!(total.previous_close, dec!(150));
        assert_eq!(total.change_pct, Some(dec!(3.33)));
        assert_eq!(total.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_aggregate_overflow_is_an_error() {
        let result = aggregate(&[entry(Decimal::MAX, Decimal::MAX), entry(Decimal::MAX, Decimal::MAX)]);
        assert!(matches!(result, Err(Error::ValueOutOfRange(_))));
    }

    #[test]
    fn test_aggregate_currency_only_when_shared() {
        let usd = quoted_in(Some("USD"), dec!(10));
        let eur = quoted_in(Some("EUR"), dec!(20));
        let unknown = quoted_in(None, dec!(5));

        let mixed = [usd.clone(), eur.clone()];
        assert_eq!(aggregate(&mixed).unwrap().currency, None);
        assert_eq!(aggregate(&mixed).unwrap().price, dec!(30));
        assert_eq!(currencies(&mixed), vec!["EUR", "USD"]);

        assert_eq!(aggregate(&[usd.clone(), unknown]).unwrap().currency, None);
        assert_eq!(
            aggregate(&[usd.clone(), usd]).unwrap().currency.as_deref(),
            Some("USD")
        );
    }

    #[test]
    fn test_aggregate_of_nothing() {
        let total = aggregate(&[]).unwrap();
        assert_eq!(total.price, Decimal::ZERO);
        assert_eq!(total.previous_close, Decimal::ZERO);
        assert_eq!(total.change_pct, None);
        assert_eq!(total.currency, None);
    }

    proptest! {
        #[test]
        fn prop_valued_amounts_have_at_most_two_decimals(
            shares in 0u64..1_000_000,
            price_cents in 0i64..10_000_000,
            close_cents in 0i64..10_000_000,
            extra in 0u32..4,
        ) {
            let price = Decimal::new(price_cents, 2 + extra);
            let close = Decimal::new(close_cents, 2 + extra);
            let snap = snapshot("X", json!({
                "lastPrice": price.to_string(),
                "previousClose": close.to_string(),
            }));
            let valued = value_holding(&Holding::new("X", shares), &snap).unwrap();

            prop_assert!(valued.price.scale() <= 2);
            prop_assert!(valued.previous_close.scale() <= 2);
            if let Some(pct) = valued.change_pct {
                prop_assert!(pct.scale() <= 2);
            }
        }
    }
}
