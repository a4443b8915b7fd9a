
use approx::assert_relative_eq;
use bsm_lib::{
    price_call, price_put, HistoricalVolatility, MarketDataProvider, MarketSnapshot,
    OptionQuoter, OptionType, PricerConfig, PricingError, QuoteBoard, QuoteRequest, QuoteState,
    Result, ScalePolicy, StaticMarketData, VolatilityEstimator,
};
use test_utils::{fixture_market_data, load_price_history, ACME_VOL_252};

/// Provider that always fails, as a network source would on an empty history.
struct DownProvider;

impl MarketDataProvider for DownProvider {
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot> {
        Err(PricingError::DataUnavailable {
            ticker: ticker.to_string(),
            reason: "empty price history".into(),
        })
    }
}

struct FixedVol(f64);

impl VolatilityEstimator for FixedVol {
    fn estimate(&self, _ticker: &str, _lookback_days: usize) -> Result<f64> {
        Ok(self.0)
    }
}

#[test]
fn test_historical_volatility_from_fixture() {
    let history = load_price_history();
    let estimator = HistoricalVolatility::new(&history);
    let vol = estimator.estimate("acme", 252).expect("ACME volatility");
    assert_relative_eq!(vol, ACME_VOL_252, epsilon = 1e-9);

    // Steady drift; only the 4-decimal rounding of the closes shows up.
    let calm = estimator.estimate("CALM", 252).unwrap();
    assert!(calm < 1e-4, "calm vol = {}", calm);
}

#[test]
fn test_two_closes_are_not_enough() {
    let history = load_price_history();
    let estimator = HistoricalVolatility::new(&history);
    assert!(matches!(
        estimator.estimate("TINY", 252),
        Err(PricingError::InsufficientHistory { observations: 1, .. })
    ));
    assert!(matches!(
        estimator.estimate("NOPE", 252),
        Err(PricingError::DataUnavailable { .. })
    ));
}

#[test]
fn test_quote_normalizes_vendor_percentages() {
    let history = load_price_history();
    let market_data = fixture_market_data();
    let estimator = HistoricalVolatility::new(&history);
    let quoter = OptionQuoter::new(&market_data, &estimator, &market_data);

    let request = QuoteRequest::new(" acme ", 100.0, 0.5, OptionType::Call);
    let quote = quoter.quote(&request).expect("ACME call quote");

    assert_eq!(quote.ticker, "ACME");
    assert_eq!(quote.spot_price, 105.0);
    assert_relative_eq!(quote.market.risk_free_rate, 0.0425, epsilon = 1e-15);
    assert_relative_eq!(quote.market.dividend_yield, 0.015, epsilon = 1e-15);
    assert_relative_eq!(quote.market.volatility, ACME_VOL_252, epsilon = 1e-9);

    let expected = price_call(105.0, 100.0, 0.5, 0.0425, quote.market.volatility, 0.015).unwrap();
    assert_eq!(quote.price, expected);

    let text = quote.to_string();
    assert!(text.starts_with("Call Option Price: "));
    assert!(text.contains("Stock Price: 105.00"));
    assert!(text.contains("Risk-Free Rate: 4.25%"));
    assert!(text.contains("Dividend Yield: 1.50%"));
}

#[test]
fn test_quote_put_side_with_explicit_decimal_policy() {
    let market_data =
        StaticMarketData::new().with_snapshot("DEC", MarketSnapshot::new(100.0, 0.0, 0.05));
    let vol = FixedVol(0.2);
    let config = PricerConfig {
        scale_policy: ScalePolicy::Decimal,
        ..PricerConfig::default()
    };
    let quoter = OptionQuoter::new(&market_data, &vol, &market_data).with_config(config);

    let quote = quoter
        .quote(&QuoteRequest::new("DEC", 100.0, 1.0, OptionType::Put))
        .unwrap();
    assert_eq!(quote.price, price_put(100.0, 100.0, 1.0, 0.05, 0.2, 0.0).unwrap());
    assert_relative_eq!(quote.price, 5.5735, epsilon = 1e-4);
}

#[test]
fn test_quote_rejections() {
    let market_data = fixture_market_data();
    let vol = FixedVol(0.2);
    let quoter = OptionQuoter::new(&market_data, &vol, &market_data);

    assert!(matches!(
        quoter.quote(&QuoteRequest::new("   ", 100.0, 1.0, OptionType::Call)),
        Err(PricingError::EmptyTicker)
    ));
    assert!(matches!(
        quoter.quote(&QuoteRequest::new("ZZZZ", 100.0, 1.0, OptionType::Call)),
        Err(PricingError::UnknownTicker(t)) if t == "ZZZZ"
    ));
    assert!(matches!(
        quoter.quote(&QuoteRequest::new("ACME", -5.0, 1.0, OptionType::Call)),
        Err(PricingError::InvalidInput { field: "strike_price", .. })
    ));
    // Snapshot marked unavailable
    let err = quoter
        .quote(&QuoteRequest::new("GONE", 100.0, 1.0, OptionType::Call))
        .unwrap_err();
    assert!(err.is_data_failure());
}

#[test]
fn test_provider_failure_propagates() {
    let validator = fixture_market_data();
    let vol = FixedVol(0.2);
    let quoter = OptionQuoter::new(&DownProvider, &vol, &validator);
    let err = quoter
        .quote(&QuoteRequest::new("ACME", 100.0, 1.0, OptionType::Call))
        .unwrap_err();
    assert!(matches!(
        err,
        PricingError::DataUnavailable { ref reason, .. } if reason == "empty price history"
    ));
}

/// A failed refresh must not leave the previous price on the board.
#[test]
fn test_board_resets_on_failure() {
    let history = load_price_history();
    let market_data = fixture_market_data();
    let estimator = HistoricalVolatility::new(&history);
    let quoter = OptionQuoter::new(&market_data, &estimator, &market_data);
    let mut board = QuoteBoard::new();

    assert_eq!(board.state(), &QuoteState::Unavailable);
    assert_eq!(board.state().to_string(), "Option Price: -");

    board
        .refresh(&quoter, &QuoteRequest::new("ACME", 100.0, 0.5, OptionType::Put))
        .expect("first refresh");
    assert!(board.current().is_some());
    assert!(board.state().to_string().starts_with("Put Option Price: "));

    // TINY has too little history for a volatility estimate.
    let err = board
        .refresh(&quoter, &QuoteRequest::new("TINY", 20.0, 0.5, OptionType::Put))
        .unwrap_err();
    assert!(matches!(err, PricingError::InsufficientHistory { .. }));
    assert!(board.current().is_none());
    assert_eq!(board.state().to_string(), "Option Price: -");
}

#[test]
fn test_config_lookback_feeds_estimator() {
    let history = load_price_history();
    let market_data = fixture_market_data();
    let config = PricerConfig::from_toml_str("lookback_days = 20").unwrap();
    let estimator = HistoricalVolatility::with_config(&history, &config);
    let quoter = OptionQuoter::new(&market_data, &estimator, &market_data).with_config(config);

    let quote = quoter
        .quote(&QuoteRequest::new("ACME", 100.0, 0.5, OptionType::Call))
        .unwrap();
    let direct = estimator.estimate("ACME", 20).unwrap();
    assert_eq!(quote.market.volatility, direct);
    assert!((quote.market.volatility - ACME_VOL_252).abs() > 1e-6);
}
