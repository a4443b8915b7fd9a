use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// Exercise side of a European option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidOptionType(s.to_string())),
        }
    }
}

/// A single European option to be priced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Current price of the underlying
    pub spot_price: f64,
    /// Exercise price
    pub strike_price: f64,
    /// Remaining life in years; zero or negative means expired
    pub time_to_expiry: f64,
    pub option_type: OptionType,
}

impl OptionContract {
    pub fn call(spot_price: f64, strike_price: f64, time_to_expiry: f64) -> Self {
        Self {
            spot_price,
            strike_price,
            time_to_expiry,
            option_type: OptionType::Call,
        }
    }

    pub fn put(spot_price: f64, strike_price: f64, time_to_expiry: f64) -> Self {
        Self {
            spot_price,
            strike_price,
            time_to_expiry,
            option_type: OptionType::Put,
        }
    }
}

/// Market inputs, all as decimals (0.05 = 5%)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Annualized continuously-compounded risk-free rate
    pub risk_free_rate: f64,
    /// Annualized volatility of log-returns
    pub volatility: f64,
    /// Continuously-compounded dividend yield
    #[serde(default)]
    pub dividend_yield: f64,
}

impl MarketParameters {
    pub fn new(risk_free_rate: f64, volatility: f64, dividend_yield: f64) -> Self {
        Self {
            risk_free_rate,
            volatility,
            dividend_yield,
        }
    }

    /// The continuous-yield dividend model these parameters carry.
    pub fn continuous_dividends(&self) -> DividendSpec {
        DividendSpec::Continuous(self.dividend_yield)
    }
}

/// A known cash dividend paid before expiry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscreteDividend {
    /// Cash amount per share
    pub amount: f64,
    /// Years from now until payment
    pub time_to_payment: f64,
}

impl DiscreteDividend {
    pub fn new(amount: f64, time_to_payment: f64) -> Self {
        Self {
            amount,
            time_to_payment,
        }
    }

    /// Whether the payment falls inside `(0, time_to_expiry]`.
    pub fn is_within(&self, time_to_expiry: f64) -> bool {
        self.time_to_payment > 0.0 && self.time_to_payment <= time_to_expiry
    }
}

impl From<(f64, f64)> for DiscreteDividend {
    /// `(amount, time_to_payment)`
    fn from((amount, time_to_payment): (f64, f64)) -> Self {
        Self::new(amount, time_to_payment)
    }
}

/// How dividends enter a pricing call. The two models never combine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum DividendSpec {
    /// Continuous yield `q` as a decimal
    Continuous(f64),
    /// Escrowed cash dividend schedule
    Discrete(Vec<DiscreteDividend>),
}

impl Default for DividendSpec {
    fn default() -> Self {
        DividendSpec::Continuous(0.0)
    }
}

impl DividendSpec {
    pub fn none() -> Self {
        Self::default()
    }

    /// Yield fed to the closed form; a discrete schedule replaces it with zero.
    pub fn continuous_yield(&self) -> f64 {
        match self {
            DividendSpec::Continuous(q) => *q,
            DividendSpec::Discrete(_) => 0.0,
        }
    }
}

/// Call and put priced together from the same inputs, plus the inputs actually used
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    /// Spot fed to the closed form (escrow-adjusted for discrete dividends)
    pub effective_spot: f64,
    pub strike_price: f64,
    pub time_to_expiry: f64,
    /// Normalized market parameters; `dividend_yield` is zero under a discrete schedule
    pub market: MarketParameters,
}

impl PricingResult {
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }
}
