//! # CAPM Analysis
//!
//! Estimate a stock's beta against a market index and forecast its
//! annualized return with a Student-t prediction interval.
//!
//! ## Pipeline
//!
//! - **Return series**: inner-join asset and market prices on date,
//!   forward-fill the annual risk-free rate, derive daily simple returns and
//!   the daily risk-free return on a 360-day compounding basis
//! - **Estimation**: OLS of asset excess return on market excess return
//! - **Forecast**: point forecast and prediction interval for one future
//!   observation, scaled to a 252-day year with the risk-free rate added back
//!
//! ## Quick Start
//!
//! ```rust
//! use capm_analysis::{
//!     CapmEstimator, ForecastInputs, ForecastIntervalCalculator, PricePoint, RatePoint,
//!     ReturnSeriesBuilder,
//! };
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), capm_analysis::CapmError> {
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let asset = [100.0, 102.0, 101.0, 104.0, 103.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| PricePoint::new(day(i as u32 + 1), *p))
//!     .collect::<Vec<_>>();
//! let market = [50.0, 50.5, 50.2, 51.0, 50.9]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| PricePoint::new(day(i as u32 + 1), *p))
//!     .collect::<Vec<_>>();
//! let risk_free = vec![RatePoint::new(day(1), 4.0)];
//!
//! let series = ReturnSeriesBuilder::new().build(&asset, &market, &risk_free)?;
//! let estimate = CapmEstimator::new().fit(series.rows())?;
//! let interval = ForecastIntervalCalculator::new(&estimate)
//!     .predict(&ForecastInputs::from_annual(10.0, 4.0, 0.90))?;
//!
//! assert!(interval.lower <= interval.point && interval.point <= interval.upper);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod forecast;
pub mod report;
pub mod returns;

// Re-export commonly used types
pub use crate::config::AnalysisConfig;
pub use crate::data::{DataLoader, PricePoint, RatePoint};
pub use crate::error::CapmError;
pub use crate::estimator::{CapmEstimate, CapmEstimator};
pub use crate::forecast::{ForecastInputs, ForecastIntervalCalculator, PredictionInterval};
pub use crate::report::{analyze, CapmReport};
pub use crate::returns::{
    FirstRowPolicy, LeadingRatePolicy, ReturnRow, ReturnSeries, ReturnSeriesBuilder,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
