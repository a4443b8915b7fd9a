//! Percent/decimal interpretation of user-supplied rates.
//!
//! The legacy rule infers the scale from magnitude: anything at or above 1 is a
//! percentage. It cannot tell a sub-1% percentage (`0.5` meaning 0.5%) from a
//! decimal (`0.5` meaning 50%), and the rule is kept as-is for compatibility.
//! [`RateInput`] lets callers state the scale explicitly instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interpret `x` as a percentage when `x >= 1`, otherwise as a decimal.
///
/// ```rust
/// use bsm_lib::as_decimal;
///
/// assert_eq!(as_decimal(5.0), 0.05);
/// assert_eq!(as_decimal(0.05), 0.05);
/// // Ambiguous band: 0.99 is taken as 99%, not 0.99%.
/// assert_eq!(as_decimal(0.99), 0.99);
/// ```
pub fn as_decimal(x: f64) -> f64 {
    if x >= 1.0 {
        x / 100.0
    } else {
        if x > 0.0 {
            debug!(value = x, "rate in (0, 1) inferred as decimal; scale is ambiguous");
        }
        x
    }
}

/// A rate or volatility with an explicit (or explicitly inferred) scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "scale", content = "value")]
pub enum RateInput {
    /// `5.0` means 5%
    Percent(f64),
    /// `0.05` means 5%
    Decimal(f64),
    /// Scale inferred with [`as_decimal`]
    Inferred(f64),
}

impl RateInput {
    pub fn to_decimal(self) -> f64 {
        match self {
            RateInput::Percent(x) => x / 100.0,
            RateInput::Decimal(x) => x,
            RateInput::Inferred(x) => as_decimal(x),
        }
    }
}

/// How untagged raw values are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalePolicy {
    /// Magnitude rule of [`as_decimal`]
    #[default]
    Inferred,
    Percent,
    Decimal,
}

impl ScalePolicy {
    pub fn tag(self, raw: f64) -> RateInput {
        match self {
            ScalePolicy::Inferred => RateInput::Inferred(raw),
            ScalePolicy::Percent => RateInput::Percent(raw),
            ScalePolicy::Decimal => RateInput::Decimal(raw),
        }
    }

    pub fn normalize(self, raw: f64) -> f64 {
        self.tag(raw).to_decimal()
    }
}
