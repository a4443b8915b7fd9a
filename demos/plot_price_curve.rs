// Example: plot_price_curve.rs
// Plots call and put prices against spot for a fixed strike, with and without
// a discrete dividend, and writes price_curve.svg to the working directory.
//
// Usage:
//     cargo run --example plot_price_curve

use std::error::Error;

use bsm_lib::{price_call, price_call_discrete_dividends, price_put, DiscreteDividend};
use plotters::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    let strike = 100.0;
    let years = 0.5;
    let rate = 0.04;
    let vol = 0.25;
    let dividends = [DiscreteDividend::new(3.0, 0.25)];

    let steps = 200;
    let (spot_min, spot_max) = (50.0, 150.0);

    let mut calls = Vec::with_capacity(steps + 1);
    let mut puts = Vec::with_capacity(steps + 1);
    let mut calls_div = Vec::with_capacity(steps + 1);
    let mut intrinsic = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let spot = spot_min + (spot_max - spot_min) * (i as f64) / (steps as f64);
        calls.push((spot, price_call(spot, strike, years, rate, vol, 0.0)?));
        puts.push((spot, price_put(spot, strike, years, rate, vol, 0.0)?));
        calls_div.push((
            spot,
            price_call_discrete_dividends(spot, strike, years, rate, vol, &dividends)?,
        ));
        intrinsic.push((spot, price_call(spot, strike, 0.0, rate, vol, 0.0)?));
    }

    let y_max = calls
        .iter()
        .chain(puts.iter())
        .map(|(_, p)| *p)
        .fold(0.0_f64, f64::max)
        * 1.05;

    let root = SVGBackend::new("price_curve.svg", (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "BSM prices | K={} T={}y r={:.1}% vol={:.0}%",
                strike,
                years,
                rate * 100.0,
                vol * 100.0
            ),
            ("sans-serif", 30),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(spot_min..spot_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Spot ($)")
        .y_desc("Option price ($)")
        .draw()?;

    chart.draw_series(vec![PathElement::new(calls, RED)])?;
    chart.draw_series(vec![PathElement::new(puts, BLUE)])?;
    chart.draw_series(vec![PathElement::new(calls_div, MAGENTA)])?;
    chart.draw_series(vec![PathElement::new(intrinsic, BLACK.stroke_width(1))])?;

    println!("Chart saved to price_curve.svg");
    Ok(())
}
