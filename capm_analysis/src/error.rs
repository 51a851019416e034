//! Error types for the capm_analysis crate

use capm_math::MathError;
use thiserror::Error;

/// Custom error types for the capm_analysis crate
#[derive(Debug, Error)]
pub enum CapmError {
    /// Too few aligned observations to compute returns, fit or forecast
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The regressor has no spread, or there are fewer than 3 observations
    #[error("Degenerate regression: {0}")]
    DegenerateRegression(String),

    /// Confidence level outside the open interval (0, 1)
    #[error("Invalid confidence level {0}: must be strictly between 0 and 1")]
    InvalidConfidence(f64),

    /// Date sets do not overlap or are not strictly increasing
    #[error("Misaligned series: {0}")]
    MisalignedSeries(String),

    /// A price, rate or parameter value is out of its domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Date parsing error: {0}")]
    DateParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, CapmError>;

impl From<MathError> for CapmError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => CapmError::InsufficientData(msg),
            MathError::InvalidInput(msg) => CapmError::InvalidInput(msg),
            MathError::DegenerateRegression(msg) => CapmError::DegenerateRegression(msg),
            MathError::CalculationError(msg) => CapmError::CalculationError(msg),
        }
    }
}

impl From<toml::de::Error> for CapmError {
    fn from(err: toml::de::Error) -> Self {
        CapmError::Config(err.to_string())
    }
}
