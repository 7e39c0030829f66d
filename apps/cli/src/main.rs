mod cli;
mod config;
mod main_lib;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use main_lib::{init_tracing, run_portfolio, run_ticker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing();

    match cli.command {
        Command::Ticker(args) => run_ticker(&config, args).await,
        Command::Portfolio(args) => run_portfolio(&config, args).await,
    }
}
