use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Letters, digits and the punctuation used by exchange suffixes,
    /// index (^GSPC), crypto (BTC-USD) and FX (EURUSD=X) symbols.
    static ref SYMBOL_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9^._=-]{1,20}$").unwrap();
}

/// Trim and upper-case a symbol.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

pub fn is_valid_symbol(symbol: &str) -> bool {
    SYMBOL_PATTERN.is_match(symbol.trim())
}
