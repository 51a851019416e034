//! Percent return and interest rate conversions
//!
//! Every value here is expressed in percent: a 1.5% move is `1.5`, not `0.015`.

use crate::{MathError, Result};

/// Day-count basis used to de-compound an annual money-market rate
pub const RATE_COMPOUNDING_DAYS: f64 = 360.0;

/// Trading days used to scale daily returns to an annual figure
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple percent return between two consecutive prices
pub fn simple_return_pct(previous: f64, current: f64) -> Result<f64> {
    if !previous.is_finite() || previous <= 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Previous price must be positive and finite, got {}",
            previous
        )));
    }
    if !current.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "Current price must be finite, got {}",
            current
        )));
    }

    Ok((current - previous) / previous * 100.0)
}

/// Simple percent returns for each consecutive pair of prices.
///
/// The result has one element fewer than `prices`.
pub fn simple_returns_pct(prices: &[f64]) -> Result<Vec<f64>> {
    if prices.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Need at least 2 prices to compute a return, have {}",
            prices.len()
        )));
    }

    prices
        .windows(2)
        .map(|w| simple_return_pct(w[0], w[1]))
        .collect()
}

/// Convert an annualized percent rate into a daily percent rate
/// compounded over [`RATE_COMPOUNDING_DAYS`]:
///
/// `((1 + R/100)^(1/360) - 1) * 100`
pub fn daily_rate_from_annual(annual_pct: f64) -> Result<f64> {
    let growth = 1.0 + annual_pct / 100.0;
    if !growth.is_finite() || growth <= 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Annual rate must be finite and above -100%, got {}",
            annual_pct
        )));
    }

    Ok((growth.powf(1.0 / RATE_COMPOUNDING_DAYS) - 1.0) * 100.0)
}

/// Inverse of [`daily_rate_from_annual`]: `((1 + d/100)^360 - 1) * 100`
pub fn annualize_daily_rate(daily_pct: f64) -> Result<f64> {
    let growth = 1.0 + daily_pct / 100.0;
    if !growth.is_finite() || growth <= 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Daily rate must be finite and above -100%, got {}",
            daily_pct
        )));
    }

    Ok((growth.powf(RATE_COMPOUNDING_DAYS) - 1.0) * 100.0)
}

/// Scale a daily percent return to an annual one over [`TRADING_DAYS_PER_YEAR`]
pub fn annualize_daily_return(daily_pct: f64) -> f64 {
    daily_pct * TRADING_DAYS_PER_YEAR
}

/// Inverse of [`annualize_daily_return`]
pub fn daily_return_from_annual(annual_pct: f64) -> f64 {
    annual_pct / TRADING_DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns_pct(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 10.0).abs() < 1e-12);
        assert!((returns[1] + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_simple_return_rejects_bad_prices() {
        assert!(simple_return_pct(0.0, 10.0).is_err());
        assert!(simple_return_pct(-1.0, 10.0).is_err());
        assert!(simple_return_pct(10.0, f64::NAN).is_err());
        assert!(simple_returns_pct(&[100.0]).is_err());
    }

    #[test]
    fn test_zero_rate_is_zero_daily() {
        assert_eq!(daily_rate_from_annual(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_daily_rate_uses_360_day_basis() {
        let daily = daily_rate_from_annual(5.0).unwrap();
        let expected = (1.05_f64.powf(1.0 / 360.0) - 1.0) * 100.0;
        assert!((daily - expected).abs() < 1e-15);

        let on_365 = (1.05_f64.powf(1.0 / 365.0) - 1.0) * 100.0;
        assert!((daily - on_365).abs() > 1e-6);
    }

    #[test]
    fn test_rate_round_trip() {
        for annual in [0.01, 0.5, 1.0, 2.5, 4.75, 10.0, 25.0] {
            let daily = daily_rate_from_annual(annual).unwrap();
            let back = annualize_daily_rate(daily).unwrap();
            assert!((back - annual).abs() < 1e-9, "{} -> {}", annual, back);
        }
    }

    #[test]
    fn test_rate_below_minus_hundred_rejected() {
        assert!(daily_rate_from_annual(-100.0).is_err());
        assert!(annualize_daily_rate(-150.0).is_err());
    }

    #[test]
    fn test_annual_scaling() {
        assert!((annualize_daily_return(0.04) - 10.08).abs() < 1e-12);
        assert!((daily_return_from_annual(25.2) - 0.1).abs() < 1e-12);
    }
}
