//! Analysis configuration, loadable from TOML
//!
//! ```toml
//! confidence_level = 0.9
//! first_row = "drop"          # or "zero_fill"
//! leading_rate = "error"      # or "drop"
//!
//! [scenario]
//! market_annual_pct = 10.0
//! risk_free_annual_pct = 3.0
//!
//! [columns]
//! asset = "Adj Close"
//! risk_free = "DGS3MO"
//! ```

use crate::error::{CapmError, Result};
use crate::forecast::ForecastInputs;
use crate::returns::{FirstRowPolicy, LeadingRatePolicy, ReturnSeriesBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.90;

/// Hypothetical annual market outcome to forecast against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub market_annual_pct: f64,
    pub risk_free_annual_pct: f64,
}

/// Value column overrides for the three CSV inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub asset: Option<String>,
    pub market: Option<String>,
    pub risk_free: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub confidence_level: f64,
    pub first_row: FirstRowPolicy,
    pub leading_rate: LeadingRatePolicy,
    pub scenario: Option<ScenarioConfig>,
    pub columns: ColumnConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            first_row: FirstRowPolicy::default(),
            leading_rate: LeadingRatePolicy::default(),
            scenario: None,
            columns: ColumnConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let c = self.confidence_level;
        if !(c > 0.0 && c < 1.0) {
            return Err(CapmError::InvalidConfidence(c));
        }
        if let Some(scenario) = &self.scenario {
            if !scenario.market_annual_pct.is_finite() || !scenario.risk_free_annual_pct.is_finite() {
                return Err(CapmError::Config(
                    "scenario rates must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return series builder carrying this configuration's row policies
    pub fn builder(&self) -> ReturnSeriesBuilder {
        ReturnSeriesBuilder::new()
            .with_first_row_policy(self.first_row)
            .with_leading_rate_policy(self.leading_rate)
    }

    /// Forecast inputs for the configured scenario, if any
    pub fn forecast_inputs(&self) -> Option<ForecastInputs> {
        self.scenario.map(|s| {
            ForecastInputs::from_annual(
                s.market_annual_pct,
                s.risk_free_annual_pct,
                self.confidence_level,
            )
        })
    }
}
