//! Ticker-driven quoting: fetch market inputs, estimate volatility, price.
//!
//! [`OptionQuoter`] wires the injected collaborators to the pricing engine.
//! [`QuoteBoard`] holds what a front end should display: the latest quote, or
//! an explicit unavailable state after any failure so a stale price is never
//! shown.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::data::traits::{MarketDataProvider, TickerValidator, VolatilityEstimator};
use crate::error::{PricingError, Result};
use crate::market::config::PricerConfig;
use crate::market::types::{MarketParameters, OptionContract, OptionType};
use crate::models::utils::ensure_positive;
use crate::price_contract;

/// What the caller asks to have priced
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub ticker: String,
    pub strike_price: f64,
    /// Years
    pub time_to_expiry: f64,
    pub option_type: OptionType,
}

impl QuoteRequest {
    pub fn new(
        ticker: impl Into<String>,
        strike_price: f64,
        time_to_expiry: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            strike_price,
            time_to_expiry,
            option_type,
        }
    }
}

/// A priced option together with the market inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub ticker: String,
    pub option_type: OptionType,
    pub price: f64,
    pub spot_price: f64,
    pub strike_price: f64,
    pub time_to_expiry: f64,
    /// Decimals
    pub market: MarketParameters,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Option Price: {:.2}", self.option_type, self.price)?;
        writeln!(f)?;
        writeln!(f, "Fetched Data:")?;
        writeln!(f, "  Stock Price: {:.2}", self.spot_price)?;
        writeln!(f, "  Volatility: {:.2}%", self.market.volatility * 100.0)?;
        writeln!(f, "  Risk-Free Rate: {:.2}%", self.market.risk_free_rate * 100.0)?;
        write!(f, "  Dividend Yield: {:.2}%", self.market.dividend_yield * 100.0)
    }
}

/// Prices options for a ticker using injected collaborators
pub struct OptionQuoter<'a> {
    market_data: &'a dyn MarketDataProvider,
    volatility: &'a dyn VolatilityEstimator,
    validator: &'a dyn TickerValidator,
    config: PricerConfig,
}

impl<'a> OptionQuoter<'a> {
    pub fn new(
        market_data: &'a dyn MarketDataProvider,
        volatility: &'a dyn VolatilityEstimator,
        validator: &'a dyn TickerValidator,
    ) -> Self {
        Self {
            market_data,
            volatility,
            validator,
            config: PricerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PricerConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch, estimate and price. Collaborator failures propagate unchanged.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let ticker = request.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(PricingError::EmptyTicker);
        }
        ensure_positive("strike_price", request.strike_price)?;

        if !self.validator.exists(&ticker) {
            return Err(PricingError::UnknownTicker(ticker));
        }

        let snapshot = self.market_data.fetch(&ticker)?;
        snapshot.ensure_available(&ticker)?;
        let volatility = self.volatility.estimate(&ticker, self.config.lookback_days)?;

        let policy = self.config.scale_policy;
        let market = MarketParameters::new(
            policy.normalize(snapshot.risk_free_rate),
            volatility,
            policy.normalize(snapshot.dividend_yield),
        );
        let contract = OptionContract {
            spot_price: snapshot.spot_price,
            strike_price: request.strike_price,
            time_to_expiry: request.time_to_expiry,
            option_type: request.option_type,
        };

        let price = price_contract(&contract, &market, &market.continuous_dividends())?;
        info!(ticker = %ticker, option_type = %request.option_type, price, "option quoted");

        Ok(Quote {
            ticker,
            option_type: request.option_type,
            price,
            spot_price: snapshot.spot_price,
            strike_price: request.strike_price,
            time_to_expiry: request.time_to_expiry,
            market,
        })
    }
}

/// Display state of a quote
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuoteState {
    #[default]
    Unavailable,
    Ready(Quote),
}

impl fmt::Display for QuoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteState::Unavailable => write!(f, "Option Price: -"),
            QuoteState::Ready(quote) => fmt::Display::fmt(quote, f),
        }
    }
}

/// Latest quote, reset to unavailable whenever a refresh fails
#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    state: QuoteState,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    pub fn current(&self) -> Option<&Quote> {
        match &self.state {
            QuoteState::Ready(quote) => Some(quote),
            QuoteState::Unavailable => None,
        }
    }

    /// Re-quote. On error the board drops any previous quote before returning it.
    pub fn refresh(&mut self, quoter: &OptionQuoter<'_>, request: &QuoteRequest) -> Result<Quote> {
        match quoter.quote(request) {
            Ok(quote) => {
                self.state = QuoteState::Ready(quote.clone());
                Ok(quote)
            }
            Err(e) => {
                warn!(ticker = %request.ticker, error = %e, "quote failed, price reset");
                self.state = QuoteState::Unavailable;
                Err(e)
            }
        }
    }
}
