//! Input series and CSV loading

use crate::error::{CapmError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// One daily closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// One observation of an annualized risk-free rate, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub annual_rate_pct: f64,
}

impl RatePoint {
    pub fn new(date: NaiveDate, annual_rate_pct: f64) -> Self {
        Self {
            date,
            annual_rate_pct,
        }
    }
}

/// Price column names tried in order when none is given
const PRICE_COLUMN_CANDIDATES: [&str; 4] = ["adj close", "close", "price", "value"];

/// Placeholders used by common exports for a missing observation
const MISSING_MARKERS: [&str; 5] = ["", ".", "null", "nan", "na"];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Price,
    Rate,
}

/// Data loader for date/value series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a daily price series from a CSV file.
    ///
    /// Without an explicit `column`, the first of `Adj Close`, `Close`,
    /// `Price` or `Value` (case-insensitive) is used, falling back to the
    /// first non-date column.
    pub fn prices_from_csv<P: AsRef<Path>>(path: P, column: Option<&str>) -> Result<Vec<PricePoint>> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading price series");
        Self::prices_from_reader(BufReader::new(file), column)
    }

    /// Load an annualized risk-free rate series (percent) from a CSV file.
    ///
    /// Without an explicit `column`, the first non-date column is used,
    /// which matches single-series exports such as FRED's `DATE,DGS3MO`.
    pub fn rates_from_csv<P: AsRef<Path>>(path: P, column: Option<&str>) -> Result<Vec<RatePoint>> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading risk-free rate series");
        Self::rates_from_reader(BufReader::new(file), column)
    }

    pub fn prices_from_reader<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<PricePoint>> {
        let rows = Self::read_series(reader, column, SeriesKind::Price)?;
        Ok(rows
            .into_iter()
            .map(|(date, price)| PricePoint::new(date, price))
            .collect())
    }

    pub fn rates_from_reader<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<RatePoint>> {
        let rows = Self::read_series(reader, column, SeriesKind::Rate)?;
        Ok(rows
            .into_iter()
            .map(|(date, rate)| RatePoint::new(date, rate))
            .collect())
    }

    fn read_series<R: Read>(
        reader: R,
        column: Option<&str>,
        kind: SeriesKind,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let date_idx = Self::detect_date_column(&headers);
        let value_idx = Self::detect_value_column(&headers, date_idx, column, kind)?;
        debug!(
            date_column = headers.get(date_idx).unwrap_or_default(),
            value_column = headers.get(value_idx).unwrap_or_default(),
            "detected series columns"
        );

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let raw_date = record.get(date_idx).unwrap_or_default();
            let date = Self::parse_date(raw_date).map_err(|e| {
                CapmError::DateParse(format!("row {}: '{}': {}", line + 2, raw_date, e))
            })?;

            let raw_value = record.get(value_idx).unwrap_or_default();
            match Self::parse_value(raw_value) {
                Some(value) => rows.push((date, value)),
                None => {
                    skipped += 1;
                    warn!(%date, value = raw_value, "skipping missing or unparseable observation");
                }
            }
        }

        if rows.is_empty() {
            return Err(CapmError::InsufficientData(
                "CSV input contains no usable observations".to_string(),
            ));
        }

        debug!(rows = rows.len(), skipped, "series loaded");
        Ok(rows)
    }

    /// Detect the date column: first header mentioning "date" or "time", else column 0
    fn detect_date_column(headers: &csv::StringRecord) -> usize {
        headers
            .iter()
            .position(|h| {
                let lower = h.to_lowercase();
                lower.contains("date") || lower.contains("time")
            })
            .unwrap_or(0)
    }

    fn detect_value_column(
        headers: &csv::StringRecord,
        date_idx: usize,
        column: Option<&str>,
        kind: SeriesKind,
    ) -> Result<usize> {
        if let Some(name) = column {
            return headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| CapmError::InvalidInput(format!("Column '{}' not found", name)));
        }

        if kind == SeriesKind::Price {
            for candidate in PRICE_COLUMN_CANDIDATES {
                if let Some(idx) = headers
                    .iter()
                    .position(|h| h.to_lowercase() == candidate)
                {
                    return Ok(idx);
                }
            }
        }

        (0..headers.len())
            .find(|&idx| idx != date_idx)
            .ok_or_else(|| CapmError::InvalidInput("No value column found in data".to_string()))
    }

    /// Parse a `YYYY-MM-DD` date, ignoring any time-of-day suffix
    fn parse_date(raw: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, DATE_FORMAT)
    }

    fn parse_value(raw: &str) -> Option<f64> {
        if MISSING_MARKERS.contains(&raw.to_lowercase().as_str()) {
            return None;
        }
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
