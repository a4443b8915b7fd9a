use statrs::statistics::Statistics;
use tracing::debug;

use crate::data::traits::{PriceHistory, VolatilityEstimator};
use crate::error::{PricingError, Result};
use crate::market::config::PricerConfig;

/// Log-returns `ln(p_i / p_{i-1})` between consecutive closes.
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Close-to-close volatility: sample standard deviation of log-returns scaled
/// by `sqrt(periods_per_year)`.
///
/// Returns `None` when fewer than two returns are available, since the sample
/// standard deviation is undefined there.
pub fn realized_volatility(closes: &[f64], periods_per_year: f64) -> Option<f64> {
    let returns = log_returns(closes);
    if returns.len() < 2 {
        return None;
    }
    let std_dev = returns.iter().std_dev();
    Some(std_dev * periods_per_year.sqrt())
}

/// Historical volatility estimator over any [`PriceHistory`]
#[derive(Debug, Clone)]
pub struct HistoricalVolatility<P> {
    history: P,
    trading_days_per_year: f64,
    min_returns: usize,
}

impl<P: PriceHistory> HistoricalVolatility<P> {
    pub fn new(history: P) -> Self {
        Self::with_config(history, &PricerConfig::default())
    }

    pub fn with_config(history: P, config: &PricerConfig) -> Self {
        Self {
            history,
            trading_days_per_year: config.trading_days_per_year,
            min_returns: config.min_return_observations.max(2),
        }
    }
}

impl<P: PriceHistory> VolatilityEstimator for HistoricalVolatility<P> {
    fn estimate(&self, ticker: &str, lookback_days: usize) -> Result<f64> {
        let closes = self.history.closes(ticker, lookback_days)?;

        if let Some(bad) = closes.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
            return Err(PricingError::unavailable(
                ticker,
                format!("non-positive close in history: {}", bad),
            ));
        }

        let observations = closes.len().saturating_sub(1);
        if observations < self.min_returns {
            return Err(PricingError::InsufficientHistory {
                ticker: ticker.to_string(),
                observations,
                required: self.min_returns,
            });
        }

        let vol = realized_volatility(&closes, self.trading_days_per_year).ok_or_else(|| {
            PricingError::InsufficientHistory {
                ticker: ticker.to_string(),
                observations,
                required: self.min_returns,
            }
        })?;

        debug!(ticker, observations, vol, "historical volatility estimated");
        Ok(vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHistory(Vec<f64>);

    impl PriceHistory for FixedHistory {
        fn closes(&self, _ticker: &str, lookback_days: usize) -> Result<Vec<f64>> {
            let start = self.0.len().saturating_sub(lookback_days + 1);
            Ok(self.0[start..].to_vec())
        }
    }

    #[test]
    fn test_constant_growth_has_zero_volatility() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let vol = realized_volatility(&closes, 252.0).unwrap();
        assert!(vol.abs() < 1e-12, "vol = {}", vol);
    }

    #[test]
    fn test_alternating_returns_known_volatility() {
        // Returns alternate +x, -x: sample std dev is x * sqrt(n / (n - 1)).
        let x: f64 = 0.01;
        let closes = vec![100.0, 100.0 * x.exp(), 100.0, 100.0 * x.exp(), 100.0];
        let n = 4.0f64;
        let expected = x * (n / (n - 1.0)).sqrt() * 252.0f64.sqrt();
        let vol = realized_volatility(&closes, 252.0).unwrap();
        assert!((vol - expected).abs() < 1e-12, "vol = {}, expected = {}", vol, expected);
    }

    #[test]
    fn test_estimator_requires_two_returns() {
        let est = HistoricalVolatility::new(FixedHistory(vec![100.0, 101.0]));
        assert!(matches!(
            est.estimate("ABC", 252),
            Err(PricingError::InsufficientHistory { observations: 1, required: 2, .. })
        ));

        let est = HistoricalVolatility::new(FixedHistory(vec![]));
        assert!(matches!(
            est.estimate("ABC", 252),
            Err(PricingError::InsufficientHistory { observations: 0, .. })
        ));
    }

    #[test]
    fn test_estimator_respects_lookback() {
        // Wild early history, calm recent history.
        let mut closes = vec![100.0, 150.0, 80.0, 160.0];
        closes.extend((0..6).map(|i| 100.0 * 1.001f64.powi(i)));
        let est = HistoricalVolatility::new(FixedHistory(closes));
        let recent = est.estimate("ABC", 5).unwrap();
        let full = est.estimate("ABC", 252).unwrap();
        assert!(recent < 1e-9);
        assert!(full > 1.0);
    }

    #[test]
    fn test_estimator_rejects_bad_prices() {
        let est = HistoricalVolatility::new(FixedHistory(vec![100.0, 0.0, 101.0, 102.0]));
        assert!(matches!(
            est.estimate("ABC", 252),
            Err(PricingError::DataUnavailable { .. })
        ));
    }
}
