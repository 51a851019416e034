use capm_analysis::config::{ScenarioConfig, DEFAULT_CONFIDENCE_LEVEL};
use capm_analysis::{AnalysisConfig, CapmError, FirstRowPolicy, LeadingRatePolicy};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = AnalysisConfig::default();

    assert_eq!(config.confidence_level, DEFAULT_CONFIDENCE_LEVEL);
    assert_eq!(config.first_row, FirstRowPolicy::Drop);
    assert_eq!(config.leading_rate, LeadingRatePolicy::Error);
    assert!(config.scenario.is_none());
    assert!(config.forecast_inputs().is_none());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = AnalysisConfig::from_toml_str("").unwrap();
    assert_eq!(config, AnalysisConfig::default());
}

#[test]
fn test_full_toml() {
    let toml = r#"
confidence_level = 0.95
first_row = "zero_fill"
leading_rate = "drop"

[scenario]
market_annual_pct = 10.0
risk_free_annual_pct = 3.0

[columns]
asset = "Adj Close"
risk_free = "DGS3MO"
"#;
    let config = AnalysisConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.confidence_level, 0.95);
    assert_eq!(config.first_row, FirstRowPolicy::ZeroFill);
    assert_eq!(config.leading_rate, LeadingRatePolicy::Drop);
    assert_eq!(
        config.scenario,
        Some(ScenarioConfig {
            market_annual_pct: 10.0,
            risk_free_annual_pct: 3.0,
        })
    );
    assert_eq!(config.columns.asset.as_deref(), Some("Adj Close"));
    assert_eq!(config.columns.market, None);

    let builder = config.builder();
    assert_eq!(builder.first_row_policy(), FirstRowPolicy::ZeroFill);
    assert_eq!(builder.leading_rate_policy(), LeadingRatePolicy::Drop);

    let inputs = config.forecast_inputs().unwrap();
    assert!((inputs.market_excess_return - 7.0 / 252.0).abs() < 1e-12);
    assert_eq!(inputs.risk_free_annual_pct, 3.0);
    assert_eq!(inputs.confidence_level, 0.95);
}

#[test]
fn test_invalid_confidence_rejected() {
    let result = AnalysisConfig::from_toml_str("confidence_level = 1.2");
    assert!(matches!(result, Err(CapmError::InvalidConfidence(_))));
}

#[test]
fn test_unknown_policy_rejected() {
    let result = AnalysisConfig::from_toml_str(r#"first_row = "interpolate""#);
    assert!(matches!(result, Err(CapmError::Config(_))));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "confidence_level = 0.99").unwrap();

    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(config.confidence_level, 0.99);

    let missing = AnalysisConfig::from_file("does_not_exist.toml");
    assert!(matches!(missing, Err(CapmError::IoError(_))));
}
