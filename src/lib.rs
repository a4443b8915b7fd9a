//! # bsm-lib: Black-Scholes-Merton European Option Pricing
//!
//! `bsm-lib` prices European calls and puts with the Black-Scholes-Merton closed
//! form, with dividends entering either as a continuous yield or as a schedule of
//! discrete cash payments (escrowed-dividend method).
//!
//! ## Core Features
//!
//! - **Closed-form pricing**: call and put formulas under a continuous dividend yield
//! - **Degenerate markets**: expired contracts and zero volatility priced at discounted
//!   intrinsic value
//! - **Discrete dividends**: spot adjusted by the present value of dividends paid before expiry
//! - **Collaborators**: market data, volatility estimation and ticker validation as injected traits
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_lib::{price_call, price_put, price_call_discrete_dividends, DiscreteDividend};
//!
//! let call = price_call(100.0, 100.0, 1.0, 0.05, 0.20, 0.0)?;
//! let put = price_put(100.0, 100.0, 1.0, 0.05, 0.20, 0.0)?;
//! assert!((call - 10.4506).abs() < 1e-4);
//! assert!((put - 5.5735).abs() < 1e-4);
//!
//! // $2 dividend in six months
//! let dividends = [DiscreteDividend::new(2.0, 0.5)];
//! let with_div = price_call_discrete_dividends(100.0, 100.0, 1.0, 0.05, 0.20, &dividends)?;
//! assert!(with_div < call);
//! # Ok::<(), bsm_lib::PricingError>(())
//! ```
//!
//! ## Conventions
//!
//! All rates, yields and volatilities are decimals (0.05 = 5%). Use
//! [`as_decimal`] or [`RateInput`] to convert user-entered values first.
//! Time to expiry is in years; zero or negative means the option has expired.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod data;
pub mod error;
pub mod market;
pub mod models;
pub mod quote;

// ================================================================================================
// IMPORTS
// ================================================================================================

use models::{
    bs::{bs_call_price, bs_put_price},
    dividends::{bs_call_price_discrete, bs_put_price_discrete, escrowed_adjusted_spot},
};

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{PricingError, Result};

// Value types and configuration
pub use market::{
    config::PricerConfig,
    normalize::{as_decimal, RateInput, ScalePolicy},
    types::{
        DiscreteDividend, DividendSpec, MarketParameters, OptionContract, OptionType,
        PricingResult,
    },
};

// Collaborators
pub use data::{
    CsvPriceHistory, HistoricalVolatility, MarketDataProvider, MarketSnapshot, PriceHistory,
    StaticMarketData, TickerValidator, VolatilityEstimator,
};

// Quoting session
pub use quote::{OptionQuoter, Quote, QuoteBoard, QuoteRequest, QuoteState};

// Math helpers
pub use models::utils::normal_cdf;

// ================================================================================================
// POSITIONAL PRICING API
// ================================================================================================

/// Price a European call under a continuous dividend yield.
///
/// # Arguments
///
/// * `spot` - Underlying price, must be positive
/// * `strike` - Strike price, must be positive
/// * `time_to_expiry` - Years to expiry; `<= 0` means expired
/// * `risk_free_rate` - Continuously-compounded rate as a decimal
/// * `volatility` - Annualized volatility as a decimal, `>= 0`
/// * `dividend_yield` - Continuous dividend yield as a decimal, `>= 0` (pass `0.0` for none)
///
/// # Degenerate Markets
///
/// When `time_to_expiry <= 0` or `volatility == 0` the result is the discounted
/// intrinsic value `max(0, S e^(-qT) - K e^(-rT))`. This is a defined branch,
/// not an error.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] for a non-positive spot or strike, a negative
/// volatility or yield, or any non-finite argument.
pub fn price_call(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    dividend_yield: f64,
) -> Result<f64> {
    bs_call_price(spot, strike, time_to_expiry, risk_free_rate, volatility, dividend_yield)
}

/// Price a European put under a continuous dividend yield.
///
/// Evaluated from the put closed form `K e^(-rT) N(-d2) - S e^(-qT) N(-d1)`, not
/// through put-call parity. Arguments and errors as in [`price_call`].
pub fn price_put(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    dividend_yield: f64,
) -> Result<f64> {
    bs_put_price(spot, strike, time_to_expiry, risk_free_rate, volatility, dividend_yield)
}

/// Price a European call with discrete cash dividends.
///
/// Dividends paid in `(0, time_to_expiry]` are discounted at the risk-free rate
/// and subtracted from the spot (floored at `1e-12`); the call is then priced
/// with a zero continuous yield. Dividends outside the option's life are
/// ignored. An empty schedule gives exactly `price_call(.., 0.0)`.
///
/// ```rust
/// use bsm_lib::{price_call_discrete_dividends, DiscreteDividend};
///
/// let divs = vec![DiscreteDividend::new(2.0, 0.5), DiscreteDividend::new(2.0, 1.5)];
/// // The second dividend is paid after expiry and does not count.
/// let call = price_call_discrete_dividends(100.0, 100.0, 1.0, 0.05, 0.20, &divs)?;
/// assert!((call - 9.2447).abs() < 1e-4);
/// # Ok::<(), bsm_lib::PricingError>(())
/// ```
pub fn price_call_discrete_dividends(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    dividends: &[DiscreteDividend],
) -> Result<f64> {
    bs_call_price_discrete(spot, strike, time_to_expiry, risk_free_rate, volatility, dividends)
}

/// Put counterpart of [`price_call_discrete_dividends`], priced at the same adjusted spot.
pub fn price_put_discrete_dividends(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    dividends: &[DiscreteDividend],
) -> Result<f64> {
    bs_put_price_discrete(spot, strike, time_to_expiry, risk_free_rate, volatility, dividends)
}

// ================================================================================================
// TYPED PRICING API
// ================================================================================================

/// Continuous yield to use, enforcing that only one dividend model applies.
///
/// `market.dividend_yield` must either be zero or agree with a continuous
/// `dividends`; combining it with a discrete schedule is rejected.
fn resolve_dividend_yield(market: &MarketParameters, dividends: &DividendSpec) -> Result<f64> {
    let q = dividends.continuous_yield();
    if market.dividend_yield != 0.0 && market.dividend_yield != q {
        let reason = match dividends {
            DividendSpec::Continuous(_) => "conflicts with the continuous yield",
            DividendSpec::Discrete(_) => "cannot be combined with a discrete dividend schedule",
        };
        return Err(PricingError::InvalidInput {
            field: "dividend_yield",
            value: market.dividend_yield,
            reason,
        });
    }
    Ok(q)
}

/// Price one contract. The dividend model is taken from `dividends`.
///
/// ```rust
/// use bsm_lib::{price_contract, DividendSpec, MarketParameters, OptionContract};
///
/// let contract = OptionContract::put(100.0, 100.0, 1.0);
/// let market = MarketParameters::new(0.05, 0.20, 0.0);
/// let put = price_contract(&contract, &market, &DividendSpec::none())?;
/// assert!((put - 5.5735).abs() < 1e-4);
/// # Ok::<(), bsm_lib::PricingError>(())
/// ```
pub fn price_contract(
    contract: &OptionContract,
    market: &MarketParameters,
    dividends: &DividendSpec,
) -> Result<f64> {
    let result = price_pair_with_config(contract, market, dividends, &PricerConfig::default())?;
    Ok(result.price(contract.option_type))
}

/// Price both the call and the put on the contract's terms.
///
/// Returns the two prices together with the effective spot (escrow-adjusted
/// under a discrete schedule) and the market parameters actually used, with
/// `dividend_yield` set to the effective continuous yield.
pub fn price_pair(
    contract: &OptionContract,
    market: &MarketParameters,
    dividends: &DividendSpec,
) -> Result<PricingResult> {
    price_pair_with_config(contract, market, dividends, &PricerConfig::default())
}

/// [`price_pair`] with the adjusted-spot floor taken from `config`.
///
/// # Errors
///
/// [`PricingError::Config`] when `config` fails [`PricerConfig::validate`].
pub fn price_pair_with_config(
    contract: &OptionContract,
    market: &MarketParameters,
    dividends: &DividendSpec,
    config: &PricerConfig,
) -> Result<PricingResult> {
    config.validate()?;
    let q = resolve_dividend_yield(market, dividends)?;
    let (t, r, sigma) = (
        contract.time_to_expiry,
        market.risk_free_rate,
        market.volatility,
    );

    let effective_spot = match dividends {
        DividendSpec::Continuous(_) => contract.spot_price,
        DividendSpec::Discrete(schedule) => escrowed_adjusted_spot(
            contract.spot_price,
            r,
            t,
            schedule,
            config.adjusted_spot_floor,
        )?,
    };

    let call_price = bs_call_price(effective_spot, contract.strike_price, t, r, sigma, q)?;
    let put_price = bs_put_price(effective_spot, contract.strike_price, t, r, sigma, q)?;

    Ok(PricingResult {
        call_price,
        put_price,
        effective_spot,
        strike_price: contract.strike_price,
        time_to_expiry: t,
        market: MarketParameters::new(r, sigma, q),
    })
}
