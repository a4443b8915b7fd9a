// Example: quote_demo.rs
// Quotes an option for a ticker from a CSV close history and static market
// snapshots, the way an interactive front end would.
//
// Usage:
//     cargo run --example quote_demo -- <TICKER> <STRIKE> <YEARS> <call|put> [config.toml]
//
// Price history comes from tests/data/prices.csv. Rates in the snapshots are
// raw vendor percentages and are normalized according to the config's
// scale_policy.

use std::env;

use anyhow::{bail, Context, Result};
use bsm_lib::{
    CsvPriceHistory, HistoricalVolatility, MarketSnapshot, OptionQuoter, OptionType,
    PricerConfig, QuoteBoard, QuoteRequest, StaticMarketData,
};

const PRICE_HISTORY: &str = "tests/data/prices.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        bail!(
            "usage: {} <TICKER> <STRIKE> <YEARS> <call|put> [config.toml]",
            args.first().map(String::as_str).unwrap_or("quote_demo")
        );
    }

    let strike: f64 = args[2]
        .parse()
        .with_context(|| format!("strike price {:?} is not a number", args[2]))?;
    let years: f64 = args[3]
        .parse()
        .with_context(|| format!("time to expiry {:?} is not a number", args[3]))?;
    let option_type: OptionType = args[4].parse()?;
    let config = match args.get(5) {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };

    let history = CsvPriceHistory::from_path(PRICE_HISTORY)
        .with_context(|| format!("loading {}", PRICE_HISTORY))?;
    let market_data = StaticMarketData::new()
        .with_snapshot("ACME", MarketSnapshot::new(105.0, 1.5, 4.25))
        .with_snapshot("CALM", MarketSnapshot::new(51.0, 0.0, 4.25))
        .with_snapshot("TINY", MarketSnapshot::new(20.5, 0.0, 4.25));

    let estimator = HistoricalVolatility::with_config(&history, &config);
    let quoter = OptionQuoter::new(&market_data, &estimator, &market_data).with_config(config);

    let mut board = QuoteBoard::new();
    let request = QuoteRequest::new(args[1].as_str(), strike, years, option_type);
    if let Err(e) = board.refresh(&quoter, &request) {
        eprintln!("Error: {}", e);
    }
    println!("{}", board.state());

    Ok(())
}
