//! Escrowed-dividend adjustment for known cash dividends.
//!
//! The present value of every dividend paid inside the option's life is taken
//! out of the spot, and the reduced spot is priced with the closed form at a
//! zero continuous yield. Dividends paid at or before today, or after expiry,
//! are skipped.

use tracing::{debug, warn};

use crate::error::Result;
use crate::market::config::ADJUSTED_SPOT_FLOOR;
use crate::market::types::{DiscreteDividend, OptionType};
use crate::models::bs::{bs_call_price, bs_put_price};
use crate::models::utils::{discount, ensure_finite, ensure_positive};

/// Present value `sum(D_i e^(-r t_i))` of the dividends paid in `(0, T]`.
///
/// # Errors
///
/// `InvalidInput` if any dividend has a non-positive or non-finite amount, or a
/// non-finite payment time. The whole schedule is checked, including entries
/// that fall outside the window.
#[allow(non_snake_case)]
pub fn dividends_present_value(dividends: &[DiscreteDividend], r: f64, T: f64) -> Result<f64> {
    for dividend in dividends {
        ensure_positive("dividend_amount", dividend.amount)?;
        ensure_finite("dividend_time", dividend.time_to_payment)?;
    }

    let mut pv = 0.0;
    for dividend in dividends {
        if !dividend.is_within(T) {
            debug!(
                amount = dividend.amount,
                time = dividend.time_to_payment,
                expiry = T,
                "dividend outside option life, skipped"
            );
            continue;
        }
        pv += dividend.amount * discount(r, dividend.time_to_payment);
    }
    Ok(pv)
}

/// Spot net of the present value of dividends paid before expiry, floored at `floor`.
#[allow(non_snake_case)]
pub fn escrowed_adjusted_spot(
    S: f64,
    r: f64,
    T: f64,
    dividends: &[DiscreteDividend],
    floor: f64,
) -> Result<f64> {
    ensure_positive("spot_price", S)?;
    ensure_finite("risk_free_rate", r)?;
    let pv = dividends_present_value(dividends, r, T)?;

    let adjusted = S - pv;
    if adjusted < floor {
        warn!(
            spot = S,
            dividends_pv = pv,
            floor,
            "dividends exceed spot, adjusted spot floored"
        );
        return Ok(floor);
    }
    Ok(adjusted)
}

/// Price either side at the escrow-adjusted spot with an explicit floor.
#[allow(non_snake_case)]
#[allow(clippy::too_many_arguments)]
pub fn escrowed_dividend_price(
    option_type: OptionType,
    S: f64,
    K: f64,
    T: f64,
    r: f64,
    sigma: f64,
    dividends: &[DiscreteDividend],
    floor: f64,
) -> Result<f64> {
    let adjusted_spot = escrowed_adjusted_spot(S, r, T, dividends, floor)?;
    match option_type {
        OptionType::Call => bs_call_price(adjusted_spot, K, T, r, sigma, 0.0),
        OptionType::Put => bs_put_price(adjusted_spot, K, T, r, sigma, 0.0),
    }
}

/// European call with discrete cash dividends (escrowed-dividend method).
///
/// The continuous yield is zero: the schedule replaces it entirely. With an
/// empty schedule the result is identical to `bs_call_price(S, K, T, r, sigma, 0.0)`.
#[allow(non_snake_case)]
pub fn bs_call_price_discrete(
    S: f64,
    K: f64,
    T: f64,
    r: f64,
    sigma: f64,
    dividends: &[DiscreteDividend],
) -> Result<f64> {
    escrowed_dividend_price(OptionType::Call, S, K, T, r, sigma, dividends, ADJUSTED_SPOT_FLOOR)
}

/// European put with discrete cash dividends, same spot adjustment as the call.
#[allow(non_snake_case)]
pub fn bs_put_price_discrete(
    S: f64,
    K: f64,
    T: f64,
    r: f64,
    sigma: f64,
    dividends: &[DiscreteDividend],
) -> Result<f64> {
    escrowed_dividend_price(OptionType::Put, S, K, T, r, sigma, dividends, ADJUSTED_SPOT_FLOOR)
}
