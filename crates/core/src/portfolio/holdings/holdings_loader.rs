//! Portfolio file loading.
//!
//! The file is a JSON array of `{"ticker": string, "shares": integer >= 0}`
//! objects. The document is read as an untyped `Value` first so that each
//! violation can be reported with its position.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use serde_json::Value;

use super::Holding;
use crate::errors::{Error, Result};

/// Read and validate the portfolio file at `path`.
pub fn load_holdings(path: &Path) -> Result<Vec<Holding>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::PortfolioFileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let document: Value = serde_json::from_str(&contents)
        .map_err(|e| Error::schema(format!("{} is not valid JSON: {}", path.display(), e)))?;

    let holdings = parse_holdings(&document)?;
    debug!("Loaded {} holdings from {}", holdings.len(), path.display());
    Ok(holdings)
}

/// Validate a parsed portfolio document.
pub fn parse_holdings(document: &Value) -> Result<Vec<Holding>> {
    let rows = document
        .as_array()
        .ok_or_else(|| Error::schema("expected a list of holdings"))?;

    if rows.is_empty() {
        return Err(Error::schema("portfolio is empty"));
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect()
}

fn parse_row(index: usize, row: &Value) -> Result<Holding> {
    let fields = row
        .as_object()
        .ok_or_else(|| Error::schema(format!("entry {} is not an object", index)))?;

    let ticker = match fields.get("ticker") {
        Some(Value::String(ticker)) if !ticker.trim().is_empty() => ticker.trim().to_string(),
        Some(Value::String(_)) => {
            return Err(Error::schema(format!("entry {}: ticker is blank", index)))
        }
        Some(_) => {
            return Err(Error::schema(format!(
                "entry {}: ticker must be a string",
                index
            )))
        }
        None => return Err(Error::schema(format!("entry {}: missing ticker", index))),
    };

    let shares = match fields.get("shares") {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(shares) => shares,
            None if n.as_i64().is_some() => {
                return Err(Error::schema(format!(
                    "entry {} ({}): shares must not be negative",
                    index, ticker
                )))
            }
            None => {
                return Err(Error::schema(format!(
                    "entry {} ({}): shares must be a whole number",
                    index, ticker
                )))
            }
        },
        Some(_) => {
            return Err(Error::schema(format!(
                "entry {} ({}): shares must be an integer",
                index, ticker
            )))
        }
        None => {
            return Err(Error::schema(format!(
                "entry {} ({}): missing shares",
                index, ticker
            )))
        }
    };

    Ok(Holding { ticker, shares })
}
