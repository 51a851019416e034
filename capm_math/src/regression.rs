//! Simple (one regressor) ordinary least squares
//!
//! Fits `y = intercept + slope * x + ε` in closed form and keeps the
//! sufficient statistics needed for inference and prediction intervals.

use crate::distribution::{student_t_critical, two_sided_p_value};
use crate::stats::{mean, sum_cross_deviations, sum_squared_deviations};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Spread of the regressor, relative to `Σxᵢ²`, that counts as zero
const VARIANCE_TOLERANCE: f64 = 1e-12;

/// Fitted simple linear regression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleRegression {
    intercept: f64,
    slope: f64,
    n: usize,
    x_mean: f64,
    y_mean: f64,
    /// Σ(xᵢ - x̄)²
    sxx: f64,
    /// Σ(yᵢ - ȳ)²
    syy: f64,
    /// Σ residualᵢ²
    sse: f64,
}

/// Two-sided interval for a single future observation at `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationInterval {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
    pub standard_error: f64,
    pub critical_value: f64,
}

impl SimpleRegression {
    /// Fit the regression of `y` on `x`.
    ///
    /// Needs at least three pairs (one residual degree of freedom) and a
    /// regressor that is not constant.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(MathError::InvalidInput(format!(
                "Regressor has {} values but response has {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 3 {
            return Err(MathError::DegenerateRegression(format!(
                "Need at least 3 observations, have {}",
                x.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Regression inputs must be finite".to_string(),
            ));
        }

        let n = x.len();
        let x_mean = mean(x)?;
        let y_mean = mean(y)?;
        let sxx = sum_squared_deviations(x)?;
        let syy = sum_squared_deviations(y)?;
        let sxy = sum_cross_deviations(x, y)?;

        let sum_sq = x.iter().map(|v| v * v).sum::<f64>();
        if sxx <= VARIANCE_TOLERANCE * sum_sq {
            return Err(MathError::DegenerateRegression(
                "Regressor has zero variance".to_string(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let sse = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum::<f64>();

        Ok(Self {
            intercept,
            slope,
            n,
            x_mean,
            y_mean,
            sxx,
            syy,
            sse,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Number of observations used in the fit
    pub fn n(&self) -> usize {
        self.n
    }

    /// Residual degrees of freedom, `n - 2`
    pub fn degrees_of_freedom(&self) -> usize {
        self.n.saturating_sub(2)
    }

    pub fn x_mean(&self) -> f64 {
        self.x_mean
    }

    pub fn y_mean(&self) -> f64 {
        self.y_mean
    }

    /// Sum of squared deviations of the regressor
    pub fn sxx(&self) -> f64 {
        self.sxx
    }

    /// Residual sum of squares
    pub fn sse(&self) -> f64 {
        self.sse
    }

    /// Residual variance, `SSE / (n - 2)`
    pub fn residual_variance(&self) -> f64 {
        self.sse / self.degrees_of_freedom() as f64
    }

    /// Residual standard error, `sqrt(SSE / (n - 2))`
    pub fn residual_standard_error(&self) -> f64 {
        self.residual_variance().sqrt()
    }

    /// Coefficient of determination.
    ///
    /// A constant response that is fitted exactly counts as a perfect fit.
    pub fn r_squared(&self) -> f64 {
        if self.syy == 0.0 {
            return if self.sse == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - self.sse / self.syy
    }

    pub fn slope_standard_error(&self) -> f64 {
        self.residual_standard_error() / self.sxx.sqrt()
    }

    pub fn intercept_standard_error(&self) -> f64 {
        self.residual_standard_error()
            * (1.0 / self.n as f64 + self.x_mean.powi(2) / self.sxx).sqrt()
    }

    /// t statistic of the slope, `None` when its standard error is zero
    pub fn slope_t_statistic(&self) -> Option<f64> {
        ratio(self.slope, self.slope_standard_error())
    }

    /// t statistic of the intercept, `None` when its standard error is zero
    pub fn intercept_t_statistic(&self) -> Option<f64> {
        ratio(self.intercept, self.intercept_standard_error())
    }

    pub fn slope_p_value(&self) -> Result<Option<f64>> {
        self.slope_t_statistic()
            .map(|t| two_sided_p_value(t, self.degrees_of_freedom()))
            .transpose()
    }

    pub fn intercept_p_value(&self) -> Result<Option<f64>> {
        self.intercept_t_statistic()
            .map(|t| two_sided_p_value(t, self.degrees_of_freedom()))
            .transpose()
    }

    /// Fitted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Standard error for a single new observation at `x`:
    ///
    /// `s * sqrt(1 + 1/n + (x - x̄)² / Sxx)`
    pub fn forecast_standard_error(&self, x: f64) -> f64 {
        self.residual_standard_error()
            * (1.0 + 1.0 / self.n as f64 + (x - self.x_mean).powi(2) / self.sxx).sqrt()
    }

    /// Prediction interval for a single new observation at `x`, using the
    /// Student-t quantile with the fit's residual degrees of freedom.
    pub fn prediction_interval(&self, x: f64, confidence_level: f64) -> Result<ObservationInterval> {
        if !x.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Forecast regressor must be finite, got {}",
                x
            )));
        }

        let critical_value = student_t_critical(confidence_level, self.degrees_of_freedom())?;
        let point = self.predict(x);
        let standard_error = self.forecast_standard_error(x);
        let margin = critical_value * standard_error;

        Ok(ObservationInterval {
            point,
            lower: point - margin,
            upper: point + margin,
            standard_error,
            critical_value,
        })
    }
}

fn ratio(coefficient: f64, standard_error: f64) -> Option<f64> {
    if standard_error > 0.0 {
        Some(coefficient / standard_error)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_fit() {
        let fit = SimpleRegression::fit(&[-1.0, 0.0, 1.0], &[-2.0, 0.0, 2.0]).unwrap();

        assert!((fit.slope() - 2.0).abs() < 1e-12);
        assert!(fit.intercept().abs() < 1e-12);
        assert_eq!(fit.residual_standard_error(), 0.0);
        assert_eq!(fit.n(), 3);
        assert_eq!(fit.degrees_of_freedom(), 1);
        assert!((fit.r_squared() - 1.0).abs() < 1e-12);
        assert!(fit.slope_t_statistic().is_none());

        let interval = fit.prediction_interval(0.5, 0.9).unwrap();
        assert!((interval.point - 1.0).abs() < 1e-12);
        assert_eq!(interval.lower, interval.upper);
    }

    #[test]
    fn test_noisy_fit_matches_hand_computation() {
        // x̄ = 3, ȳ = 4, Sxx = 10, Sxy = 6 -> slope 0.6, intercept 2.2
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = SimpleRegression::fit(&x, &y).unwrap();

        assert!((fit.slope() - 0.6).abs() < 1e-12);
        assert!((fit.intercept() - 2.2).abs() < 1e-12);
        // residuals: -0.8, 0.6, 1.0, -0.6, -0.2 -> SSE = 2.4
        assert!((fit.sse() - 2.4).abs() < 1e-12);
        assert!((fit.residual_variance() - 0.8).abs() < 1e-12);
        // Syy = 6 -> R² = 1 - 2.4 / 6
        assert!((fit.r_squared() - 0.6).abs() < 1e-12);
        assert!((fit.slope_standard_error() - (0.08_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_standard_error_grows_away_from_mean() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = SimpleRegression::fit(&x, &y).unwrap();

        let at_mean = fit.forecast_standard_error(3.0);
        let far = fit.forecast_standard_error(10.0);
        assert!(far > at_mean);
        let expected = (0.8_f64 * (1.0 + 1.0 / 5.0)).sqrt();
        assert!((at_mean - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(
            SimpleRegression::fit(&[1.0, 2.0], &[1.0, 2.0]),
            Err(MathError::DegenerateRegression(_))
        ));
        assert!(matches!(
            SimpleRegression::fit(&[0.1, 0.1, 0.1, 0.1], &[1.0, 2.0, 3.0, 4.0]),
            Err(MathError::DegenerateRegression(_))
        ));
        assert!(matches!(
            SimpleRegression::fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            SimpleRegression::fit(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_tiny_spread_still_fits() {
        let x = [1e-7, 2e-7, 3e-7, 4e-7];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let fit = SimpleRegression::fit(&x, &y).unwrap();

        assert!((fit.slope() - 2.0).abs() < 1e-9);
        assert!(fit.intercept().abs() < 1e-15);
        assert_eq!(fit.degrees_of_freedom(), 2);
    }

    #[test]
    fn test_all_zero_regressor_is_degenerate() {
        assert!(matches!(
            SimpleRegression::fit(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]),
            Err(MathError::DegenerateRegression(_))
        ));
    }

    #[test]
    fn test_wider_confidence_wider_interval() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = SimpleRegression::fit(&x, &y).unwrap();

        let narrow = fit.prediction_interval(2.0, 0.90).unwrap();
        let wide = fit.prediction_interval(2.0, 0.99).unwrap();
        assert!(wide.lower < narrow.lower);
        assert!(wide.upper > narrow.upper);
    }
}
