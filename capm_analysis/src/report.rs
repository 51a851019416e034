//! End-to-end analysis and its report

use crate::config::AnalysisConfig;
use crate::data::{PricePoint, RatePoint};
use crate::error::Result;
use crate::estimator::{CapmEstimate, CapmEstimator};
use crate::forecast::{ForecastInputs, ForecastIntervalCalculator, PredictionInterval};
use crate::returns::FirstRowPolicy;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Regression coefficients and inference statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionSummary {
    pub intercept: f64,
    pub beta: f64,
    pub residual_standard_error: f64,
    pub residual_variance: f64,
    pub n: usize,
    pub r_squared: f64,
    pub intercept_standard_error: f64,
    pub beta_standard_error: f64,
    pub intercept_t_statistic: Option<f64>,
    pub beta_t_statistic: Option<f64>,
    pub intercept_p_value: Option<f64>,
    pub beta_p_value: Option<f64>,
    pub annualized_alpha: f64,
}

impl RegressionSummary {
    pub fn from_estimate(estimate: &CapmEstimate) -> Result<Self> {
        Ok(Self {
            intercept: estimate.intercept(),
            beta: estimate.beta(),
            residual_standard_error: estimate.residual_standard_error(),
            residual_variance: estimate.residual_variance(),
            n: estimate.n(),
            r_squared: estimate.r_squared(),
            intercept_standard_error: estimate.intercept_standard_error(),
            beta_standard_error: estimate.beta_standard_error(),
            intercept_t_statistic: estimate.intercept_t_statistic(),
            beta_t_statistic: estimate.beta_t_statistic(),
            intercept_p_value: estimate.intercept_p_value()?,
            beta_p_value: estimate.beta_p_value()?,
            annualized_alpha: estimate.annualized_alpha(),
        })
    }
}

/// A forecast scenario and its interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub inputs: ForecastInputs,
    pub interval: PredictionInterval,
}

/// Structured result of one CAPM analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapmReport {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub observations: usize,
    pub first_row: FirstRowPolicy,
    pub regression: RegressionSummary,
    pub forecast: Option<ForecastSummary>,
}

impl CapmReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build returns, fit the regression and, when the configuration carries a
/// scenario, compute its prediction interval.
pub fn analyze(
    asset: &[PricePoint],
    market: &[PricePoint],
    risk_free: &[RatePoint],
    config: &AnalysisConfig,
) -> Result<CapmReport> {
    config.validate()?;

    let series = config.builder().build(asset, market, risk_free)?;
    let estimate = CapmEstimator::new().fit(series.rows())?;
    let regression = RegressionSummary::from_estimate(&estimate)?;

    let forecast = config
        .forecast_inputs()
        .map(|inputs| {
            ForecastIntervalCalculator::new(&estimate)
                .predict(&inputs)
                .map(|interval| ForecastSummary { inputs, interval })
        })
        .transpose()?;

    info!(
        observations = series.len(),
        beta = regression.beta,
        alpha = regression.intercept,
        with_forecast = forecast.is_some(),
        "CAPM analysis complete"
    );

    Ok(CapmReport {
        first_date: series.first_date(),
        last_date: series.last_date(),
        observations: series.len(),
        first_row: config.first_row,
        regression,
        forecast,
    })
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for CapmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regression;

        writeln!(f, "CAPM Regression:")?;
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => writeln!(f, "  Period:        {} to {}", first, last)?,
            _ => writeln!(f, "  Period:        n/a")?,
        }
        writeln!(f, "  Observations:  {} (first row: {:?})", self.observations, self.first_row)?;
        writeln!(
            f,
            "  Alpha:         {:.6}  (se {:.6}, t {}, p {})",
            r.intercept,
            r.intercept_standard_error,
            fmt_opt(r.intercept_t_statistic, 3),
            fmt_opt(r.intercept_p_value, 4)
        )?;
        writeln!(
            f,
            "  Beta:          {:.6}  (se {:.6}, t {}, p {})",
            r.beta,
            r.beta_standard_error,
            fmt_opt(r.beta_t_statistic, 3),
            fmt_opt(r.beta_p_value, 4)
        )?;
        writeln!(f, "  Residual SE:   {:.6}", r.residual_standard_error)?;
        writeln!(f, "  R-squared:     {:.4}", r.r_squared)?;
        writeln!(f, "  Annual alpha:  {:.4}%", r.annualized_alpha)?;

        if let Some(forecast) = &self.forecast {
            let i = &forecast.interval;
            writeln!(f)?;
            writeln!(f, "Forecast ({:.0}% prediction interval):", i.confidence_level * 100.0)?;
            writeln!(
                f,
                "  Market excess: {:.6}% daily, risk-free {:.4}% annual",
                forecast.inputs.market_excess_return, forecast.inputs.risk_free_annual_pct
            )?;
            writeln!(f, "  t critical:    {:.4}", i.critical_value)?;
            writeln!(f, "  Point:         {:.4}%", i.point)?;
            writeln!(f, "  Lower:         {:.4}%", i.lower)?;
            writeln!(f, "  Upper:         {:.4}%", i.upper)?;
        }

        Ok(())
    }
}
