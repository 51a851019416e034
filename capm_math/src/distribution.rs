//! Student-t quantiles and tail probabilities

use crate::{MathError, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

fn standard_t(degrees_of_freedom: usize) -> Result<StudentsT> {
    if degrees_of_freedom == 0 {
        return Err(MathError::InsufficientData(
            "Student-t distribution needs at least 1 degree of freedom".to_string(),
        ));
    }

    StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
        .map_err(|e| MathError::CalculationError(format!("Student-t construction failed: {}", e)))
}

/// Two-sided critical value `t` such that `P(|T| <= t) = confidence_level`
pub fn student_t_critical(confidence_level: f64, degrees_of_freedom: usize) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Confidence level must be strictly between 0 and 1, got {}",
            confidence_level
        )));
    }

    let dist = standard_t(degrees_of_freedom)?;
    let upper_tail = 1.0 - (1.0 - confidence_level) / 2.0;
    let t = dist.inverse_cdf(upper_tail);
    if !t.is_finite() {
        return Err(MathError::CalculationError(format!(
            "Student-t quantile is not finite for p = {} with {} df",
            upper_tail, degrees_of_freedom
        )));
    }

    Ok(t)
}

/// Two-sided p-value of a t statistic, `2 * P(T > |t|)`
pub fn two_sided_p_value(t_statistic: f64, degrees_of_freedom: usize) -> Result<f64> {
    if t_statistic.is_nan() {
        return Err(MathError::InvalidInput(
            "t statistic must not be NaN".to_string(),
        ));
    }

    let dist = standard_t(degrees_of_freedom)?;
    let p = 2.0 * (1.0 - dist.cdf(t_statistic.abs()));
    Ok(p.clamp(0.0, 1.0))
}
