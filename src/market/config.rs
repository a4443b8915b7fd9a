use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::{PricingError, Result};
use crate::market::normalize::ScalePolicy;

/// Floor applied to the escrow-adjusted spot so the log-moneyness stays defined.
pub const ADJUSTED_SPOT_FLOOR: f64 = 1e-12;

/// Trading days used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Pricer and collaborator settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PricerConfig {
    /// Lower bound for `S - PV(dividends)`
    #[serde(default = "default_adjusted_spot_floor")]
    pub adjusted_spot_floor: f64,

    /// Annualization factor for historical volatility
    #[serde(default = "default_trading_days_per_year")]
    pub trading_days_per_year: f64,

    /// Lookback window, in trading days, for historical volatility
    #[serde(default = "default_lookback_days")]
    pub lookback_days: usize,

    /// Minimum number of log-returns for a sample standard deviation
    #[serde(default = "default_min_return_observations")]
    pub min_return_observations: usize,

    /// How raw rate and yield values from providers are read
    #[serde(default)]
    pub scale_policy: ScalePolicy,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            adjusted_spot_floor: default_adjusted_spot_floor(),
            trading_days_per_year: default_trading_days_per_year(),
            lookback_days: default_lookback_days(),
            min_return_observations: default_min_return_observations(),
            scale_policy: ScalePolicy::default(),
        }
    }
}

impl PricerConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PricerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading pricer config {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("parsing pricer config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.adjusted_spot_floor.is_finite() && self.adjusted_spot_floor > 0.0) {
            return Err(PricingError::Config(format!(
                "adjusted_spot_floor must be positive, got {}",
                self.adjusted_spot_floor
            )));
        }
        if !(self.trading_days_per_year.is_finite() && self.trading_days_per_year > 0.0) {
            return Err(PricingError::Config(format!(
                "trading_days_per_year must be positive, got {}",
                self.trading_days_per_year
            )));
        }
        if self.lookback_days == 0 {
            return Err(PricingError::Config("lookback_days must be at least 1".into()));
        }
        if self.min_return_observations < 2 {
            return Err(PricingError::Config(format!(
                "min_return_observations must be at least 2, got {}",
                self.min_return_observations
            )));
        }
        Ok(())
    }
}

fn default_adjusted_spot_floor() -> f64 {
    ADJUSTED_SPOT_FLOOR
}

fn default_trading_days_per_year() -> f64 {
    TRADING_DAYS_PER_YEAR
}

fn default_lookback_days() -> usize {
    252
}

fn default_min_return_observations() -> usize {
    2
}
