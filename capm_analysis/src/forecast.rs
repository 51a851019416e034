//! Forecast Interval Calculator
//!
//! Turns a fitted [`CapmEstimate`] and a market scenario into a prediction
//! interval for the asset's annualized total return.

use crate::error::{CapmError, Result};
use crate::estimator::CapmEstimate;
use capm_math::returns::{annualize_daily_return, daily_return_from_annual};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Market scenario for a single forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastInputs {
    /// Daily market excess return, percent
    pub market_excess_return: f64,
    /// Annualized risk-free rate added back to the forecast, percent
    pub risk_free_annual_pct: f64,
    /// Two-sided confidence level, e.g. `0.90`
    pub confidence_level: f64,
}

impl ForecastInputs {
    pub fn new(market_excess_return: f64, risk_free_annual_pct: f64, confidence_level: f64) -> Self {
        Self {
            market_excess_return,
            risk_free_annual_pct,
            confidence_level,
        }
    }

    /// Scenario from an expected annual market return and annual risk-free
    /// rate; the daily market excess is `(market - rf) / 252`.
    pub fn from_annual(market_annual_pct: f64, risk_free_annual_pct: f64, confidence_level: f64) -> Self {
        Self::new(
            daily_return_from_annual(market_annual_pct - risk_free_annual_pct),
            risk_free_annual_pct,
            confidence_level,
        )
    }
}

/// Daily excess-return interval the annual figures are derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyExcessInterval {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Prediction interval for the asset's annualized total return, percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub confidence_level: f64,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
    pub daily_excess: DailyExcessInterval,
    /// Standard error of the single-observation forecast, daily percent
    pub standard_error: f64,
    /// Two-sided Student-t quantile with the fit's residual degrees of freedom
    pub critical_value: f64,
}

impl PredictionInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, annual_return_pct: f64) -> bool {
        (self.lower..=self.upper).contains(&annual_return_pct)
    }
}

/// Computes prediction intervals from a fitted estimate
#[derive(Debug, Clone, Copy)]
pub struct ForecastIntervalCalculator<'a> {
    estimate: &'a CapmEstimate,
}

impl<'a> ForecastIntervalCalculator<'a> {
    pub fn new(estimate: &'a CapmEstimate) -> Self {
        Self { estimate }
    }

    pub fn predict(&self, inputs: &ForecastInputs) -> Result<PredictionInterval> {
        let confidence = inputs.confidence_level;
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(CapmError::InvalidConfidence(confidence));
        }
        if !inputs.risk_free_annual_pct.is_finite() {
            return Err(CapmError::InvalidInput(format!(
                "risk-free rate must be finite, got {}",
                inputs.risk_free_annual_pct
            )));
        }

        let daily = self
            .estimate
            .regression()
            .prediction_interval(inputs.market_excess_return, confidence)?;

        let annualize = |daily_excess: f64| {
            annualize_daily_return(daily_excess) + inputs.risk_free_annual_pct
        };

        let interval = PredictionInterval {
            confidence_level: confidence,
            point: annualize(daily.point),
            lower: annualize(daily.lower),
            upper: annualize(daily.upper),
            daily_excess: DailyExcessInterval {
                point: daily.point,
                lower: daily.lower,
                upper: daily.upper,
            },
            standard_error: daily.standard_error,
            critical_value: daily.critical_value,
        };

        debug!(
            market_excess = inputs.market_excess_return,
            confidence,
            t = interval.critical_value,
            lower = interval.lower,
            upper = interval.upper,
            "computed prediction interval"
        );

        Ok(interval)
    }
}
