// demos/pricing_demo.rs

//! Demonstration of closed-form pricing with and without dividends
//!
//! This example shows how to:
//! 1. Price a call and a put with the positional API
//! 2. Add a continuous dividend yield
//! 3. Price with a schedule of discrete cash dividends
//! 4. Use the typed API to get both sides and the inputs actually used

use anyhow::Result;
use bsm_lib::{
    as_decimal, price_call, price_call_discrete_dividends, price_pair, price_put,
    price_put_discrete_dividends, DiscreteDividend, DividendSpec, MarketParameters,
    OptionContract,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("BSM Option Pricing Demo");
    println!("=======================");

    // Inputs as a user would type them: percentages or decimals
    let spot = 100.0;
    let strike = 100.0;
    let years = 1.0;
    let rate = as_decimal(5.0);
    let vol = as_decimal(20.0);

    println!(
        "\nStep 1: No dividends (S={}, K={}, T={}y, r={:.2}%, vol={:.2}%)",
        spot,
        strike,
        years,
        rate * 100.0,
        vol * 100.0
    );
    let call = price_call(spot, strike, years, rate, vol, 0.0)?;
    let put = price_put(spot, strike, years, rate, vol, 0.0)?;
    println!("  Call: {:.4}", call);
    println!("  Put:  {:.4}", put);
    println!(
        "  Parity check C - P - (S - K e^-rT) = {:.2e}",
        call - put - (spot - strike * (-rate * years).exp())
    );

    println!("\nStep 2: Continuous dividend yield of 3%");
    let q = as_decimal(3.0);
    println!("  Call: {:.4}", price_call(spot, strike, years, rate, vol, q)?);
    println!("  Put:  {:.4}", price_put(spot, strike, years, rate, vol, q)?);

    println!("\nStep 3: Discrete dividends");
    let dividends = vec![
        DiscreteDividend::new(2.0, 0.5),
        DiscreteDividend::new(2.0, 1.25), // after expiry, ignored
    ];
    let call_div = price_call_discrete_dividends(spot, strike, years, rate, vol, &dividends)?;
    let put_div = price_put_discrete_dividends(spot, strike, years, rate, vol, &dividends)?;
    println!("  Call: {:.4} (vs {:.4} without dividends)", call_div, call);
    println!("  Put:  {:.4} (vs {:.4} without dividends)", put_div, put);

    println!("\nStep 4: Typed API");
    let contract = OptionContract::call(spot, strike, years);
    let market = MarketParameters::new(rate, vol, 0.0);
    let result = price_pair(&contract, &market, &DividendSpec::Discrete(dividends))?;
    println!("  Effective spot: {:.4}", result.effective_spot);
    println!("  Call: {:.4}  Put: {:.4}", result.call_price, result.put_price);
    println!(
        "  Used r={:.4} vol={:.4} q={:.4}",
        result.market.risk_free_rate, result.market.volatility, result.market.dividend_yield
    );

    println!("\nExpired and zero-volatility contracts");
    println!(
        "  T=0, S=110, K=100: call {:.4}, put {:.4}",
        price_call(110.0, 100.0, 0.0, rate, vol, 0.0)?,
        price_put(110.0, 100.0, 0.0, rate, vol, 0.0)?
    );
    println!(
        "  vol=0, S=110, K=100, T=1: call {:.4}",
        price_call(110.0, 100.0, 1.0, rate, 0.0, 0.0)?
    );

    Ok(())
}
