use std::sync::Arc;

use anyhow::Context;
use fincli_core::{load_holdings, ValuationMode, ValuationService, ValuationServiceTrait};
use fincli_market_data::{
    normalize_symbol, CacheNamespace, CachePolicy, CachingSession, FileCache, MarketDataProvider,
    RateLimiter, ReqwestTransport, TickerClient, YahooProvider,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{PortfolioArgs, TickerArgs};
use crate::config::Config;
use crate::render;

/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing() {
    let log_format = std::env::var("FINCLI_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Snapshot client for one cache namespace, with its own cache directory,
/// TTL and rate limiter.
pub fn build_client(
    config: &Config,
    namespace: CacheNamespace,
    policy: CachePolicy,
) -> anyhow::Result<TickerClient> {
    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new());

    let cache_dir = config.cache_dir(namespace);
    let cache = FileCache::open(cache_dir, config.ttl(namespace))
        .with_context(|| format!("Failed to open cache at {}", cache_dir.display()))?;

    let limiter = match config.min_interval {
        Some(interval) => RateLimiter::new(interval),
        None => {
            let rate = provider.rate_limit();
            RateLimiter::from_rate(rate.requests, rate.per)
        }
    };

    let transport = ReqwestTransport::new(config.http_timeout)?;

    tracing::debug!(
        "{:?} session: cache {} (ttl {:?}), min interval {:?}, policy {:?}",
        namespace,
        cache_dir.display(),
        config.ttl(namespace),
        limiter.min_interval(),
        policy
    );

    let session = CachingSession::new(Arc::new(cache), Arc::new(limiter), Arc::new(transport))
        .with_policy(policy);

    Ok(TickerClient::new(Arc::new(session), provider))
}

fn log_stats(client: &TickerClient) {
    let stats = client.session().stats();
    tracing::info!("Cache hits: {}, misses: {}", stats.hits, stats.misses);
}

pub async fn run_ticker(config: &Config, args: TickerArgs) -> anyhow::Result<()> {
    let client = build_client(config, CacheNamespace::Ticker, CachePolicy::Use)?;

    if args.info {
        let snapshot = client.snapshot(&args.symbol).await?;
        println!("{}", render::snapshot_table(&snapshot));
    } else {
        let attribute = args
            .attribute
            .unwrap_or_else(|| config.default_attribute.clone());
        let value = client.attribute(&args.symbol, &attribute).await?;
        println!(
            "{}",
            render::attribute_line(&normalize_symbol(&args.symbol), &attribute, &value)
        );
    }

    log_stats(&client);
    Ok(())
}

pub async fn run_portfolio(config: &Config, args: PortfolioArgs) -> anyhow::Result<()> {
    let holdings = load_holdings(&args.file)?;

    let policy = if args.refresh {
        CachePolicy::Refresh
    } else {
        CachePolicy::Use
    };
    let client = build_client(config, CacheNamespace::Portfolio, policy)?;
    let service = ValuationService::new(client.clone());

    let mode = if args.total {
        ValuationMode::TotalOnly
    } else {
        ValuationMode::PerEntry
    };
    let report = service.valuate(&holdings, mode).await?;

    for skipped in &report.skipped {
        eprintln!("Warning: skipped {}: {}", skipped.ticker, skipped.reason);
    }
    if args.total && report.is_multi_currency() {
        eprintln!(
            "Warning: total adds values quoted in {} without conversion",
            report.currencies.join(", ")
        );
    }
    println!("{}", render::portfolio_table(&report.entries, args.total));

    log_stats(&client);
    Ok(())
}
