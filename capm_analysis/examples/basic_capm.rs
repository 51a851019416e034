use capm_analysis::{
    CapmEstimator, ForecastInputs, ForecastIntervalCalculator, PricePoint, RatePoint,
    ReturnSeriesBuilder,
};
use chrono::{Duration, NaiveDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("CAPM Analysis: Basic Example");
    println!("============================\n");

    // Create sample data
    let (asset, market, risk_free) = create_sample_data();
    println!(
        "Sample data created: {} asset prices, {} market prices, {} rate observations\n",
        asset.len(),
        market.len(),
        risk_free.len()
    );

    // Build daily returns and fit the regression
    let series = ReturnSeriesBuilder::new().build(&asset, &market, &risk_free)?;
    let estimate = CapmEstimator::new().fit(series.rows())?;

    println!("Alpha (daily):  {:.6}%", estimate.intercept());
    println!("Beta:           {:.4}", estimate.beta());
    println!("Residual SE:    {:.6}", estimate.residual_standard_error());
    println!("R-squared:      {:.4}\n", estimate.r_squared());

    // Forecast a year where the market returns 10% and cash pays 3%
    let calculator = ForecastIntervalCalculator::new(&estimate);
    for confidence in [0.90, 0.95, 0.99] {
        let interval = calculator.predict(&ForecastInputs::from_annual(10.0, 3.0, confidence))?;
        println!(
            "{:.0}% interval: {:.2}% .. {:.2}% (point {:.2}%)",
            confidence * 100.0,
            interval.lower,
            interval.upper,
            interval.point
        );
    }

    Ok(())
}

// Asset moves 1.2x the market plus a wobble; rates are published weekly
fn create_sample_data() -> (Vec<PricePoint>, Vec<PricePoint>, Vec<RatePoint>) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut asset = Vec::new();
    let mut market = Vec::new();
    let mut risk_free = Vec::new();

    let mut asset_price = 100.0;
    let mut market_price = 3800.0;
    for i in 0..250 {
        let date = start + Duration::days(i);
        if i > 0 {
            let market_ret = (i as f64 * 0.9).sin() * 0.8;
            let asset_ret = 0.01 + 1.2 * market_ret + 0.4 * (i as f64 * 2.1).cos();
            market_price *= 1.0 + market_ret / 100.0;
            asset_price *= 1.0 + asset_ret / 100.0;
        }
        asset.push(PricePoint::new(date, asset_price));
        market.push(PricePoint::new(date, market_price));
        if i % 7 == 0 {
            risk_free.push(RatePoint::new(date, 4.0 + i as f64 / 500.0));
        }
    }

    (asset, market, risk_free)
}
