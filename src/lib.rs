//! # CAPM Workspace
//!
//! Facade over the two workspace crates:
//!
//! - [`math`] (`capm_math`): statistics, rate conversions, OLS and Student-t
//! - [`analysis`] (`capm_analysis`): return series, beta estimation,
//!   prediction intervals, CSV loading and reporting
//!
//! ## Example
//!
//! ```
//! use capm_workspace::{analyze, AnalysisConfig, PricePoint, RatePoint};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
//! let asset: Vec<PricePoint> = [10.0, 10.4, 10.1, 10.6, 10.5]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| PricePoint::new(day(i as u32 + 1), *p))
//!     .collect();
//! let market: Vec<PricePoint> = [20.0, 20.2, 20.1, 20.4, 20.3]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| PricePoint::new(day(i as u32 + 1), *p))
//!     .collect();
//! let risk_free = [RatePoint::new(day(1), 5.0)];
//!
//! let report = analyze(&asset, &market, &risk_free, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.observations, 4);
//! ```

pub use capm_analysis as analysis;
pub use capm_math as math;

pub use capm_analysis::{
    analyze, AnalysisConfig, CapmError, CapmEstimate, CapmEstimator, CapmReport, DataLoader,
    FirstRowPolicy, ForecastInputs, ForecastIntervalCalculator, LeadingRatePolicy,
    PredictionInterval, PricePoint, RatePoint, ReturnRow, ReturnSeries, ReturnSeriesBuilder,
};
