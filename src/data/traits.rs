use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Raw market inputs for one ticker as reported by a data provider.
///
/// Rate and yield are raw values; their scale (percent or decimal) is
/// resolved by the caller's [`ScalePolicy`](crate::ScalePolicy). A non-finite
/// field marks the value as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub spot_price: f64,
    pub dividend_yield: f64,
    pub risk_free_rate: f64,
}

impl MarketSnapshot {
    pub fn new(spot_price: f64, dividend_yield: f64, risk_free_rate: f64) -> Self {
        Self {
            spot_price,
            dividend_yield,
            risk_free_rate,
        }
    }

    /// Refuse snapshots carrying an unavailable (non-finite) or non-positive spot.
    pub fn ensure_available(&self, ticker: &str) -> Result<()> {
        if !self.spot_price.is_finite() || self.spot_price <= 0.0 {
            return Err(PricingError::unavailable(ticker, "spot price unavailable"));
        }
        if !self.dividend_yield.is_finite() {
            return Err(PricingError::unavailable(ticker, "dividend yield unavailable"));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::unavailable(ticker, "risk-free rate unavailable"));
        }
        Ok(())
    }
}

/// Source of spot, dividend yield and risk-free rate for a ticker
pub trait MarketDataProvider: Send + Sync {
    /// Fails with `DataUnavailable` when the provider has nothing usable.
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot>;
}

/// Annualized volatility estimate for a ticker, as a decimal
pub trait VolatilityEstimator: Send + Sync {
    fn estimate(&self, ticker: &str, lookback_days: usize) -> Result<f64>;
}

/// Whether a ticker symbol is known
pub trait TickerValidator: Send + Sync {
    fn exists(&self, ticker: &str) -> bool;
}

/// Daily closing prices, oldest first
pub trait PriceHistory: Send + Sync {
    /// Up to `lookback_days + 1` most recent closes, so the window spans
    /// `lookback_days` returns.
    fn closes(&self, ticker: &str, lookback_days: usize) -> Result<Vec<f64>>;
}

impl<T: PriceHistory + ?Sized> PriceHistory for &T {
    fn closes(&self, ticker: &str, lookback_days: usize) -> Result<Vec<f64>> {
        (**self).closes(ticker, lookback_days)
    }
}
