//! capm_report: estimate beta and a return prediction interval from CSV files.
//!
//! ```text
//! capm_report --asset AAPL.csv --market GSPC.csv --risk-free DGS3MO.csv \
//!     --market-return 10 --risk-free-rate 3 --confidence 0.9
//! ```

use anyhow::{Context, Result};
use capm_analysis::config::ScenarioConfig;
use capm_analysis::{analyze, AnalysisConfig, DataLoader, FirstRowPolicy, LeadingRatePolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "capm_report",
    version,
    about = "CAPM beta estimation with a Student-t prediction interval"
)]
struct Cli {
    /// Asset daily prices (CSV with a date column).
    #[arg(long)]
    asset: PathBuf,

    /// Market index daily prices (CSV with a date column).
    #[arg(long)]
    market: PathBuf,

    /// Annualized risk-free rate in percent (CSV with a date column).
    #[arg(long)]
    risk_free: PathBuf,

    /// TOML analysis config. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Two-sided confidence level for the prediction interval.
    #[arg(long)]
    confidence: Option<f64>,

    /// Treatment of the first joined day.
    #[arg(long, value_enum)]
    first_row: Option<FirstRowArg>,

    /// Treatment of joined days before the first risk-free observation.
    #[arg(long, value_enum)]
    leading_rate: Option<LeadingRateArg>,

    /// Expected annual market return for the forecast, percent.
    #[arg(long, requires = "risk_free_rate")]
    market_return: Option<f64>,

    /// Annual risk-free rate for the forecast, percent.
    #[arg(long, requires = "market_return")]
    risk_free_rate: Option<f64>,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FirstRowArg {
    Drop,
    ZeroFill,
}

impl From<FirstRowArg> for FirstRowPolicy {
    fn from(arg: FirstRowArg) -> Self {
        match arg {
            FirstRowArg::Drop => FirstRowPolicy::Drop,
            FirstRowArg::ZeroFill => FirstRowPolicy::ZeroFill,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LeadingRateArg {
    Error,
    Drop,
}

impl From<LeadingRateArg> for LeadingRatePolicy {
    fn from(arg: LeadingRateArg) -> Self {
        match arg {
            LeadingRateArg::Error => LeadingRatePolicy::Error,
            LeadingRateArg::Drop => LeadingRatePolicy::Drop,
        }
    }
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(confidence) = cli.confidence {
        config.confidence_level = confidence;
    }
    if let Some(first_row) = cli.first_row {
        config.first_row = first_row.into();
    }
    if let Some(leading_rate) = cli.leading_rate {
        config.leading_rate = leading_rate.into();
    }
    if let (Some(market_annual_pct), Some(risk_free_annual_pct)) = (cli.market_return, cli.risk_free_rate) {
        config.scenario = Some(ScenarioConfig {
            market_annual_pct,
            risk_free_annual_pct,
        });
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capm_analysis=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let asset = DataLoader::prices_from_csv(&cli.asset, config.columns.asset.as_deref())
        .with_context(|| format!("loading asset prices from {}", cli.asset.display()))?;
    let market = DataLoader::prices_from_csv(&cli.market, config.columns.market.as_deref())
        .with_context(|| format!("loading market prices from {}", cli.market.display()))?;
    let risk_free = DataLoader::rates_from_csv(&cli.risk_free, config.columns.risk_free.as_deref())
        .with_context(|| format!("loading risk-free rates from {}", cli.risk_free.display()))?;

    let report = analyze(&asset, &market, &risk_free, &config)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUTS: [&str; 7] = [
        "capm_report",
        "--asset",
        "a.csv",
        "--market",
        "m.csv",
        "--risk-free",
        "rf.csv",
    ];

    #[test]
    fn test_defaults_without_policy_flags() {
        let cli = Cli::try_parse_from(INPUTS).unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.first_row, FirstRowPolicy::Drop);
        assert_eq!(config.leading_rate, LeadingRatePolicy::Error);
        assert!(config.scenario.is_none());
    }

    #[test]
    fn test_row_policy_flags_override_config() {
        let args = INPUTS
            .iter()
            .copied()
            .chain(["--first-row", "zero-fill", "--leading-rate", "drop"]);
        let cli = Cli::try_parse_from(args).unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.first_row, FirstRowPolicy::ZeroFill);
        assert_eq!(config.leading_rate, LeadingRatePolicy::Drop);
    }

    #[test]
    fn test_scenario_flags() {
        let args = INPUTS.iter().copied().chain([
            "--market-return",
            "10",
            "--risk-free-rate",
            "3",
            "--confidence",
            "0.95",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        let config = load_config(&cli).unwrap();

        let scenario = config.scenario.unwrap();
        assert_eq!(scenario.market_annual_pct, 10.0);
        assert_eq!(scenario.risk_free_annual_pct, 3.0);
        assert_eq!(config.confidence_level, 0.95);
    }

    #[test]
    fn test_unknown_leading_rate_rejected() {
        let args = INPUTS.iter().copied().chain(["--leading-rate", "backfill"]);
        assert!(Cli::try_parse_from(args).is_err());
    }
}
