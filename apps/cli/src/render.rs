//! Terminal rendering of snapshots and valuations.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use fincli_core::PortfolioEntry;
use fincli_market_data::PriceSnapshot;
use rust_decimal::Decimal;
use serde_json::Value;

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title)
        .add_attribute(Attribute::Bold)
        .fg(Color::Magenta)
}

/// Floats to 2 decimals, everything else as is.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map(|f| format!("{:.2}", f))
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn snapshot_table(snapshot: &PriceSnapshot) -> Table {
    let mut table = new_table(vec![header("Attribute"), header("Value")]);
    for (name, value) in &snapshot.fields {
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue),
            Cell::new(format_value(value)),
        ]);
    }
    table
}

pub fn attribute_line(symbol: &str, attribute: &str, value: &Value) -> String {
    format!("{} for {} is {}", attribute, symbol, format_value(value))
}

/// `▲ x%` / `▼ x%`, or `n/a` when there is no previous close to compare with.
pub fn change_cell(change_pct: Option<Decimal>) -> Cell {
    match change_pct {
        Some(pct) if pct >= Decimal::ZERO => {
            Cell::new(format!("▲ {:.2}%", pct)).fg(Color::Green)
        }
        Some(pct) => Cell::new(format!("▼ {:.2}%", pct)).fg(Color::Red),
        None => Cell::new("n/a").fg(Color::DarkGrey),
    }
}

pub fn portfolio_table(entries: &[PortfolioEntry], total: bool) -> Table {
    let first = if total { "Total" } else { "Ticker" };
    let mut table = new_table(vec![header(first), header("Value"), header("Change")]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.ticker)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", entry.price)),
            change_cell(entry.change_pct),
        ]);
    }
    table
}
