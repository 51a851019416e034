//! Return Series Builder
//!
//! Joins the asset, market and risk-free series on date and derives daily
//! simple returns, the daily risk-free return and both excess returns.
//!
//! Two policies make the edge rows explicit:
//!
//! - [`FirstRowPolicy`]: the first joined day has no prior price. `Drop`
//!   (default) omits it; `ZeroFill` emits it with zero asset and market
//!   returns, which feeds one artificial observation into the regression.
//! - [`LeadingRatePolicy`]: joined days before the first risk-free
//!   observation have nothing to forward-fill from. `Error` (default) fails
//!   with [`CapmError::InsufficientData`]; `Drop` discards those days.

use crate::data::{PricePoint, RatePoint};
use crate::error::{CapmError, Result};
use capm_math::returns::{daily_rate_from_annual, simple_return_pct};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// How to treat the first joined observation, which has no prior price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstRowPolicy {
    /// Emit no row for the first day
    #[default]
    Drop,
    /// Emit the first day with zero asset and market returns
    ZeroFill,
}

/// How to treat joined days that precede every risk-free observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadingRatePolicy {
    /// Fail with `InsufficientData`
    #[default]
    Error,
    /// Discard the leading days
    Drop,
}

/// Daily returns for one date, all in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRow {
    pub date: NaiveDate,
    pub asset_return: f64,
    pub market_return: f64,
    pub risk_free_return: f64,
    pub asset_excess: f64,
    pub market_excess: f64,
}

impl ReturnRow {
    /// Build a row from raw returns; excess returns are derived
    pub fn new(date: NaiveDate, asset_return: f64, market_return: f64, risk_free_return: f64) -> Self {
        Self {
            date,
            asset_return,
            market_return,
            risk_free_return,
            asset_excess: asset_return - risk_free_return,
            market_excess: market_return - risk_free_return,
        }
    }
}

/// Date-ordered sequence of [`ReturnRow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    rows: Vec<ReturnRow>,
}

impl ReturnSeries {
    /// Wrap rows that are already in strictly increasing date order
    pub fn from_rows(rows: Vec<ReturnRow>) -> Result<Self> {
        if let Some(pair) = rows.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(CapmError::MisalignedSeries(format!(
                "return rows are not strictly increasing at {}",
                pair[1].date
            )));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReturnRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn asset_excess(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.asset_excess).collect()
    }

    pub fn market_excess(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.market_excess).collect()
    }
}

/// One date present in both price series, with the rate in force that day
#[derive(Debug, Clone, Copy)]
struct AlignedDay {
    date: NaiveDate,
    asset_price: f64,
    market_price: f64,
    annual_rate_pct: f64,
}

/// Builds a [`ReturnSeries`] from raw price and rate series
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnSeriesBuilder {
    first_row: FirstRowPolicy,
    leading_rate: LeadingRatePolicy,
}

impl ReturnSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_row_policy(mut self, policy: FirstRowPolicy) -> Self {
        self.first_row = policy;
        self
    }

    pub fn with_leading_rate_policy(mut self, policy: LeadingRatePolicy) -> Self {
        self.leading_rate = policy;
        self
    }

    pub fn first_row_policy(&self) -> FirstRowPolicy {
        self.first_row
    }

    pub fn leading_rate_policy(&self) -> LeadingRatePolicy {
        self.leading_rate
    }

    /// Join the three series and compute daily returns
    pub fn build(
        &self,
        asset: &[PricePoint],
        market: &[PricePoint],
        risk_free: &[RatePoint],
    ) -> Result<ReturnSeries> {
        validate_prices(asset, "asset")?;
        validate_prices(market, "market")?;
        validate_rates(risk_free)?;

        let joined = inner_join(asset, market);
        if joined.is_empty() {
            return Err(CapmError::MisalignedSeries(
                "asset and market series share no dates".to_string(),
            ));
        }

        let aligned = self.forward_fill_rates(&joined, risk_free)?;
        if aligned.len() < 2 {
            return Err(CapmError::InsufficientData(format!(
                "need at least 2 aligned days to compute returns, have {}",
                aligned.len()
            )));
        }

        let leading = match self.first_row {
            FirstRowPolicy::Drop => None,
            FirstRowPolicy::ZeroFill => {
                let first = &aligned[0];
                let rf = daily_rate_from_annual(first.annual_rate_pct)?;
                Some(ReturnRow::new(first.date, 0.0, 0.0, rf))
            }
        };

        let rows = leading
            .into_iter()
            .map(Ok)
            .chain(aligned.windows(2).map(|w| return_row(&w[0], &w[1])))
            .collect::<Result<Vec<_>>>()?;

        info!(
            asset_days = asset.len(),
            market_days = market.len(),
            joined_days = joined.len(),
            rows = rows.len(),
            first_row = ?self.first_row,
            "built return series"
        );

        Ok(ReturnSeries { rows })
    }

    fn forward_fill_rates(
        &self,
        joined: &[(NaiveDate, f64, f64)],
        risk_free: &[RatePoint],
    ) -> Result<Vec<AlignedDay>> {
        let mut aligned = Vec::with_capacity(joined.len());
        let mut rates = risk_free.iter().peekable();
        let mut current: Option<f64> = None;
        let mut dropped = 0usize;

        for &(date, asset_price, market_price) in joined {
            while let Some(rate) = rates.next_if(|r| r.date <= date) {
                current = Some(rate.annual_rate_pct);
            }

            match (current, self.leading_rate) {
                (Some(annual_rate_pct), _) => aligned.push(AlignedDay {
                    date,
                    asset_price,
                    market_price,
                    annual_rate_pct,
                }),
                (None, LeadingRatePolicy::Drop) => dropped += 1,
                (None, LeadingRatePolicy::Error) => {
                    return Err(CapmError::InsufficientData(format!(
                        "no risk-free observation on or before {}",
                        date
                    )));
                }
            }
        }

        if dropped > 0 {
            debug!(dropped, "dropped leading days without a risk-free rate");
        }
        Ok(aligned)
    }
}

fn return_row(previous: &AlignedDay, current: &AlignedDay) -> Result<ReturnRow> {
    Ok(ReturnRow::new(
        current.date,
        simple_return_pct(previous.asset_price, current.asset_price)?,
        simple_return_pct(previous.market_price, current.market_price)?,
        daily_rate_from_annual(current.annual_rate_pct)?,
    ))
}

/// Merge two date-sorted price series, keeping only shared dates
fn inner_join(asset: &[PricePoint], market: &[PricePoint]) -> Vec<(NaiveDate, f64, f64)> {
    let mut joined = Vec::with_capacity(asset.len().min(market.len()));
    let (mut i, mut j) = (0, 0);

    while i < asset.len() && j < market.len() {
        match asset[i].date.cmp(&market[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                joined.push((asset[i].date, asset[i].price, market[j].price));
                i += 1;
                j += 1;
            }
        }
    }

    joined
}

fn validate_prices(series: &[PricePoint], name: &str) -> Result<()> {
    if series.is_empty() {
        return Err(CapmError::InsufficientData(format!("{} series is empty", name)));
    }
    check_increasing(series.iter().map(|p| p.date), name)?;
    if let Some(bad) = series.iter().find(|p| !p.price.is_finite() || p.price <= 0.0) {
        return Err(CapmError::InvalidInput(format!(
            "{} price on {} must be positive and finite, got {}",
            name, bad.date, bad.price
        )));
    }
    Ok(())
}

fn validate_rates(series: &[RatePoint]) -> Result<()> {
    if series.is_empty() {
        return Err(CapmError::InsufficientData(
            "risk-free series is empty".to_string(),
        ));
    }
    check_increasing(series.iter().map(|r| r.date), "risk-free")?;
    if let Some(bad) = series.iter().find(|r| !r.annual_rate_pct.is_finite()) {
        return Err(CapmError::InvalidInput(format!(
            "risk-free rate on {} must be finite, got {}",
            bad.date, bad.annual_rate_pct
        )));
    }
    Ok(())
}

fn check_increasing(dates: impl Iterator<Item = NaiveDate>, name: &str) -> Result<()> {
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        if let Some(prev) = previous {
            if date <= prev {
                return Err(CapmError::MisalignedSeries(format!(
                    "{} dates are not strictly increasing: {} follows {}",
                    name, date, prev
                )));
            }
        }
        previous = Some(date);
    }
    Ok(())
}
