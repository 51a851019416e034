//! CAPM Estimator
//!
//! Fits `asset_excess = alpha + beta * market_excess + ε` by ordinary least
//! squares over a set of [`ReturnRow`]s.

use crate::error::Result;
use crate::returns::ReturnRow;
use capm_math::returns::annualize_daily_return;
use capm_math::SimpleRegression;
use serde::Serialize;
use tracing::debug;

/// Fitted CAPM regression. Immutable once produced by [`CapmEstimator::fit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapmEstimate {
    regression: SimpleRegression,
}

impl CapmEstimate {
    /// Daily intercept (Jensen's alpha), percent
    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }

    /// Slope of asset excess on market excess
    pub fn beta(&self) -> f64 {
        self.regression.slope()
    }

    pub fn residual_standard_error(&self) -> f64 {
        self.regression.residual_standard_error()
    }

    pub fn residual_variance(&self) -> f64 {
        self.regression.residual_variance()
    }

    /// Number of return rows used in the fit
    pub fn n(&self) -> usize {
        self.regression.n()
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.regression.degrees_of_freedom()
    }

    pub fn market_excess_mean(&self) -> f64 {
        self.regression.x_mean()
    }

    pub fn asset_excess_mean(&self) -> f64 {
        self.regression.y_mean()
    }

    /// Σ(market_excessᵢ - mean)²
    pub fn market_excess_sum_of_squares(&self) -> f64 {
        self.regression.sxx()
    }

    pub fn r_squared(&self) -> f64 {
        self.regression.r_squared()
    }

    pub fn beta_standard_error(&self) -> f64 {
        self.regression.slope_standard_error()
    }

    pub fn intercept_standard_error(&self) -> f64 {
        self.regression.intercept_standard_error()
    }

    pub fn beta_t_statistic(&self) -> Option<f64> {
        self.regression.slope_t_statistic()
    }

    pub fn intercept_t_statistic(&self) -> Option<f64> {
        self.regression.intercept_t_statistic()
    }

    pub fn beta_p_value(&self) -> Result<Option<f64>> {
        Ok(self.regression.slope_p_value()?)
    }

    pub fn intercept_p_value(&self) -> Result<Option<f64>> {
        Ok(self.regression.intercept_p_value()?)
    }

    /// Intercept scaled to a 252-day year, percent
    pub fn annualized_alpha(&self) -> f64 {
        annualize_daily_return(self.intercept())
    }

    /// Underlying regression, for forecasting
    pub fn regression(&self) -> &SimpleRegression {
        &self.regression
    }
}

/// Fits [`CapmEstimate`]s. Stateless; every fit is a pure function of its rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapmEstimator;

impl CapmEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Regress asset excess return on market excess return.
    ///
    /// Fails with `DegenerateRegression` for fewer than 3 rows or a constant
    /// market excess return.
    pub fn fit(&self, rows: &[ReturnRow]) -> Result<CapmEstimate> {
        let market: Vec<f64> = rows.iter().map(|r| r.market_excess).collect();
        let asset: Vec<f64> = rows.iter().map(|r| r.asset_excess).collect();

        let regression = SimpleRegression::fit(&market, &asset)?;
        debug!(
            n = regression.n(),
            alpha = regression.intercept(),
            beta = regression.slope(),
            residual_se = regression.residual_standard_error(),
            "fitted CAPM regression"
        );

        Ok(CapmEstimate { regression })
    }
}
