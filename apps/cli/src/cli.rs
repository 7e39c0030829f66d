use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fincli_core::constants::PORTFOLIO_FILE_NAME;

#[derive(Parser, Debug)]
#[command(name = "fincli", version, about = "Stock prices and portfolio valuation from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show market data for a single ticker
    Ticker(TickerArgs),
    /// Value the holdings listed in a portfolio file
    Portfolio(PortfolioArgs),
}

#[derive(Args, Debug)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. AAPL
    pub symbol: String,

    /// Print every attribute of the ticker
    #[arg(short, long, conflicts_with = "attribute")]
    pub info: bool,

    /// Print a single attribute (defaults to FINCLI_DEFAULT_ATTRIBUTE or lastPrice)
    #[arg(short, long, value_name = "NAME")]
    pub attribute: Option<String>,
}

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Only print the portfolio total
    #[arg(short, long)]
    pub total: bool,

    /// Portfolio file: a JSON list of {"ticker", "shares"} objects
    #[arg(short, long, value_name = "PATH", default_value = PORTFOLIO_FILE_NAME)]
    pub file: PathBuf,

    /// Ignore cached prices for this run
    #[arg(long, visible_alias = "cache")]
    pub refresh: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ticker_defaults() {
        let cli = Cli::try_parse_from(["fincli", "ticker", "AAPL"]).unwrap();
        match cli.command {
            Command::Ticker(args) => {
                assert_eq!(args.symbol, "AAPL");
                assert!(!args.info);
                assert_eq!(args.attribute, None);
            }
            other => panic!("Expected ticker command, got {:?}", other),
        }
    }

    #[test]
    fn test_info_and_attribute_conflict() {
        let result = Cli::try_parse_from(["fincli", "ticker", "AAPL", "-i", "-a", "currency"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_portfolio_flags() {
        let cli = Cli::try_parse_from(["fincli", "portfolio"]).unwrap();
        match cli.command {
            Command::Portfolio(args) => {
                assert_eq!(args.file, PathBuf::from("portfolio.json"));
                assert!(!args.total);
                assert!(!args.refresh);
            }
            other => panic!("Expected portfolio command, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["fincli", "portfolio", "-t", "-f", "mine.json", "--cache"])
            .unwrap();
        match cli.command {
            Command::Portfolio(args) => {
                assert_eq!(args.file, PathBuf::from("mine.json"));
                assert!(args.total);
                assert!(args.refresh);
            }
            other => panic!("Expected portfolio command, got {:?}", other),
        }
    }
}
