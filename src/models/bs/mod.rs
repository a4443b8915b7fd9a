// Black-Scholes-Merton call and put pricing under a continuous dividend yield.
// The call and put are evaluated from their own closed forms; the put is never
// derived from the call through parity.

use tracing::debug;

use crate::error::{PricingError, Result};
use crate::models::utils::{
    discount, ensure_finite, ensure_non_negative, ensure_positive, normal_cdf,
};

/// Rejects inputs that would otherwise propagate NaN or infinity through the formulas.
#[allow(non_snake_case)]
pub(crate) fn validate_inputs(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<()> {
    ensure_positive("spot_price", S)?;
    ensure_positive("strike_price", K)?;
    ensure_finite("time_to_expiry", T)?;
    ensure_finite("risk_free_rate", r)?;
    ensure_non_negative("volatility", sigma)?;
    ensure_non_negative("dividend_yield", q)?;
    Ok(())
}

/// Expired contracts and zero volatility collapse to the discounted intrinsic value.
#[allow(non_snake_case)]
#[inline]
fn is_degenerate(T: f64, sigma: f64) -> bool {
    T <= 0.0 || sigma <= 0.0
}

/// `d1` and `d2` expanded term by term so nothing is squared. A huge but finite
/// volatility sends them towards `+inf` and `-inf`.
#[allow(non_snake_case)]
fn d1_d2(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> (f64, f64) {
    let sqrt_t = T.sqrt();
    let vol_sqrt_t = sigma * sqrt_t;
    let drift = (S / K).ln() / vol_sqrt_t + (r - q) * sqrt_t / sigma;
    let half_var = 0.5 * vol_sqrt_t;
    (drift + half_var, drift - half_var)
}

/// Discount factors can overflow for extreme horizons.
#[allow(non_snake_case)]
fn finite_price(price: f64, T: f64) -> Result<f64> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(PricingError::invalid(
            "time_to_expiry",
            T,
            "discount factor overflows at this horizon",
        ))
    }
}

/// Price of a European call option under Black-Scholes-Merton assumptions.
///
/// Arguments follow the conventional order: spot `S`, strike `K`, time to
/// expiry `T` in years, risk-free rate `r`, volatility `sigma` and continuous
/// dividend yield `q`, all rates as decimals.
///
/// When `T <= 0` or `sigma <= 0` the price is `max(0, S e^(-qT) - K e^(-rT))`.
///
/// # Errors
///
/// [`PricingError::InvalidInput`](crate::PricingError::InvalidInput) for a
/// non-positive spot or strike, negative volatility or dividend yield, or any
/// non-finite argument.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<f64> {
    validate_inputs(S, K, T, r, sigma, q)?;

    let spot_df = discount(q, T);
    let strike_df = discount(r, T);

    if is_degenerate(T, sigma) {
        debug!(T, sigma, "call priced at discounted intrinsic value");
        return finite_price((S * spot_df - K * strike_df).max(0.0), T);
    }

    let (d1, d2) = d1_d2(S, K, T, r, sigma, q);
    finite_price(S * spot_df * normal_cdf(d1) - K * strike_df * normal_cdf(d2), T)
}

/// Price of a European put option under Black-Scholes-Merton assumptions.
///
/// Same arguments and error policy as [`bs_call_price`]. The degenerate branch
/// returns `max(0, K e^(-rT) - S e^(-qT))`.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<f64> {
    validate_inputs(S, K, T, r, sigma, q)?;

    let spot_df = discount(q, T);
    let strike_df = discount(r, T);

    if is_degenerate(T, sigma) {
        debug!(T, sigma, "put priced at discounted intrinsic value");
        return finite_price((K * strike_df - S * spot_df).max(0.0), T);
    }

    let (d1, d2) = d1_d2(S, K, T, r, sigma, q);
    finite_price(K * strike_df * normal_cdf(-d2) - S * spot_df * normal_cdf(-d1), T)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PricingError;

    #[test]
    fn test_textbook_atm_values() {
        let call = bs_call_price(100.0, 100.0, 1.0, 0.05, 0.20, 0.0).unwrap();
        let put = bs_put_price(100.0, 100.0, 1.0, 0.05, 0.20, 0.0).unwrap();
        assert!((call - 10.4506).abs() < 1e-4, "call = {}", call);
        assert!((put - 5.5735).abs() < 1e-4, "put = {}", put);
    }

    #[test]
    fn test_dividend_yield_lowers_call_raises_put() {
        let call = bs_call_price(100.0, 100.0, 1.0, 0.05, 0.20, 0.03).unwrap();
        let put = bs_put_price(100.0, 100.0, 1.0, 0.05, 0.20, 0.03).unwrap();
        assert!((call - 8.652_528_553_942_709).abs() < 1e-9);
        assert!((put - 6.730_917_649_163_302).abs() < 1e-9);
    }

    #[test]
    fn test_expired_contract_is_intrinsic() {
        assert_eq!(bs_call_price(110.0, 100.0, 0.0, 0.05, 0.2, 0.0).unwrap(), 10.0);
        assert_eq!(bs_put_price(110.0, 100.0, 0.0, 0.05, 0.2, 0.0).unwrap(), 0.0);
        assert_eq!(bs_put_price(90.0, 100.0, 0.0, 0.05, 0.2, 0.0).unwrap(), 10.0);
        assert_eq!(bs_call_price(100.0, 100.0, 0.0, 0.05, 0.2, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_expiry_uses_degenerate_formula() {
        // e^(-rT) grows past 1 for T < 0; the formula is applied as written.
        let (s, k, t, r): (f64, f64, f64, f64) = (100.0, 95.0, -0.5, 0.04);
        let expected = (s - k * (-r * t).exp()).max(0.0);
        let call = bs_call_price(s, k, t, r, 0.3, 0.0).unwrap();
        assert!((call - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_discounted_intrinsic() {
        let (s, k, t, r, q): (f64, f64, f64, f64, f64) = (100.0, 95.0, 2.0, 0.03, 0.01);
        let expected = (s * (-q * t).exp() - k * (-r * t).exp()).max(0.0);
        let call = bs_call_price(s, k, t, r, 0.0, q).unwrap();
        assert!((call - expected).abs() < 1e-12);
        assert_eq!(bs_put_price(s, k, t, r, 0.0, q).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        assert!(matches!(
            bs_call_price(0.0, 100.0, 1.0, 0.05, 0.2, 0.0),
            Err(PricingError::InvalidInput { field: "spot_price", .. })
        ));
        assert!(matches!(
            bs_put_price(100.0, -1.0, 1.0, 0.05, 0.2, 0.0),
            Err(PricingError::InvalidInput { field: "strike_price", .. })
        ));
        assert!(matches!(
            bs_call_price(100.0, 100.0, 1.0, 0.05, -0.2, 0.0),
            Err(PricingError::InvalidInput { field: "volatility", .. })
        ));
        assert!(bs_call_price(100.0, 100.0, f64::NAN, 0.05, 0.2, 0.0).is_err());
        assert!(bs_put_price(100.0, 100.0, 1.0, 0.05, 0.2, -0.01).is_err());
    }

    #[test]
    fn test_huge_volatility_tends_to_bounds() {
        let (s, k, t, r): (f64, f64, f64, f64) = (100.0, 100.0, 1.0, 0.05);
        for sigma in [1e6, 1e100, 1e200, 1e308] {
            let call = bs_call_price(s, k, t, r, sigma, 0.0).unwrap();
            let put = bs_put_price(s, k, t, r, sigma, 0.0).unwrap();
            assert!((call - s).abs() < 1e-9, "sigma = {}, call = {}", sigma, call);
            assert!((put - k * (-r * t).exp()).abs() < 1e-9, "sigma = {}, put = {}", sigma, put);
        }
        // sigma * sqrt(T) itself overflows here
        let call = bs_call_price(s, k, 4.0, r, 1e308, 0.0).unwrap();
        assert!((call - s).abs() < 1e-9, "call = {}", call);
    }

    #[test]
    fn test_overflowing_discount_is_rejected() {
        assert!(matches!(
            bs_put_price(100.0, 100.0, -1e5, 0.05, 0.2, 0.0),
            Err(PricingError::InvalidInput { field: "time_to_expiry", .. })
        ));
        // The call side stays finite: max(0, S - inf) = 0.
        assert_eq!(bs_call_price(100.0, 100.0, -1e5, 0.05, 0.2, 0.0).unwrap(), 0.0);
    }
}
