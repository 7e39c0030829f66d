/// Portfolio file read when none is given
pub const PORTFOLIO_FILE_NAME: &str = "portfolio.json";

/// Ticker column value of the aggregate row
pub const AGGREGATE_TICKER: &str = "Portfolio";

/// Decimal places kept for money and percentages
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
