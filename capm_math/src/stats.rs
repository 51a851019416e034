//! Descriptive statistics over slices of observations
//!
//! All functions are pure and work on plain `&[f64]` slices so they can be
//! chained over columns extracted from a return table.

use crate::{MathError, Result};

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from the mean, `Σ(xᵢ - x̄)²`
pub fn sum_squared_deviations(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    Ok(values.iter().map(|v| (v - m).powi(2)).sum())
}

/// Sum of cross deviations, `Σ(xᵢ - x̄)(yᵢ - ȳ)`
pub fn sum_cross_deviations(x: &[f64], y: &[f64]) -> Result<f64> {
    check_same_length(x, y)?;
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    Ok(x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum())
}

/// Sample variance with `n - 1` denominator
pub fn sample_variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Sample variance needs at least 2 values, have {}",
            values.len()
        )));
    }

    Ok(sum_squared_deviations(values)? / (values.len() - 1) as f64)
}

/// Sample covariance with `n - 1` denominator
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    check_same_length(x, y)?;
    if x.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Sample covariance needs at least 2 pairs, have {}",
            x.len()
        )));
    }

    Ok(sum_cross_deviations(x, y)? / (x.len() - 1) as f64)
}

/// Sample standard deviation
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    Ok(sample_variance(values)?.sqrt())
}

fn check_same_length(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "Series lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 2.5).abs() < 1e-12);
        assert!(matches!(mean(&[]), Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_sample_variance_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Σ(x - 5)² = 32, n - 1 = 7
        assert!((sum_squared_deviations(&values).unwrap() - 32.0).abs() < 1e-12);
        assert!((sample_variance(&values).unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((sample_std_dev(&values).unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(sample_variance(&[1.0]).is_err());
    }

    #[test]
    fn test_covariance() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.0];
        assert!((sum_cross_deviations(&x, &y).unwrap() - 4.0).abs() < 1e-12);
        assert!((sample_covariance(&x, &y).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let result = sample_covariance(&[1.0, 2.0], &[1.0]);
        assert!(matches!(result, Err(MathError::InvalidInput(_))));
    }
}
