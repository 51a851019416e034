//! # CAPM Math
//!
//! Numeric building blocks for CAPM analysis.
//! This crate provides descriptive statistics, percent return and
//! risk-free rate conversions, a closed-form simple OLS regression and
//! Student-t critical values.

use thiserror::Error;

pub mod distribution;
pub mod regression;
pub mod returns;
pub mod stats;

pub use regression::SimpleRegression;

/// Errors that can occur in the numeric routines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate regression: {0}")]
    DegenerateRegression(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for CAPM math operations
pub type Result<T> = std::result::Result<T, MathError>;
