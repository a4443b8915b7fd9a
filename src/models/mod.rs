pub mod bs;
pub mod dividends;

/// Utility functions shared by the pricers
pub mod utils {
    use crate::error::{PricingError, Result};

    /// Standard normal cumulative distribution function: P(Z <= x).
    ///
    /// `0.5 * (1 + erf(x / sqrt(2)))`, evaluated as `0.5 * erfc(-x / sqrt(2))` so
    /// the lower tail keeps full relative precision instead of cancelling
    /// against 1.
    pub fn normal_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
    }

    /// Continuously compounded discount factor `e^(-rate * t)`.
    #[inline]
    pub fn discount(rate: f64, t: f64) -> f64 {
        (-rate * t).exp()
    }

    /// Finite and strictly positive.
    pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(PricingError::invalid(field, value, "must be finite"));
        }
        if value <= 0.0 {
            return Err(PricingError::invalid(field, value, "must be positive"));
        }
        Ok(value)
    }

    /// Finite and not negative.
    pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(PricingError::invalid(field, value, "must be finite"));
        }
        if value < 0.0 {
            return Err(PricingError::invalid(field, value, "must not be negative"));
        }
        Ok(value)
    }

    pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::invalid(field, value, "must be finite"))
        }
    }

}
