use capm_analysis::{CapmError, DataLoader};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_yahoo_style_prices_prefer_adj_close() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
    writeln!(file, "2023-01-03,130.28,130.90,124.17,125.07,123.63,112117500").unwrap();
    writeln!(file, "2023-01-04,126.89,128.66,125.08,126.36,124.91,89113600").unwrap();
    writeln!(file, "2023-01-05,127.13,127.77,124.76,125.02,123.58,80962700").unwrap();

    let prices = DataLoader::prices_from_csv(file.path(), None).unwrap();

    assert_eq!(prices.len(), 3);
    assert_eq!(prices[0].date, date(2023, 1, 3));
    assert_eq!(prices[0].price, 123.63);
    assert_eq!(prices[2].price, 123.58);
}

#[test]
fn test_close_column_and_timestamp_dates() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,close").unwrap();
    writeln!(file, "2023-01-03 00:00:00,10.5").unwrap();
    writeln!(file, "2023-01-04T00:00:00Z,11.0").unwrap();

    let prices = DataLoader::prices_from_csv(file.path(), None).unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[1].date, date(2023, 1, 4));
    assert_eq!(prices[1].price, 11.0);
}

#[test]
fn test_explicit_column() {
    let data = "Date,Open,Close\n2023-01-03,1.0,2.0\n2023-01-04,3.0,4.0\n";
    let prices = DataLoader::prices_from_reader(data.as_bytes(), Some("open")).unwrap();

    assert_eq!(prices.iter().map(|p| p.price).collect::<Vec<_>>(), vec![1.0, 3.0]);

    let result = DataLoader::prices_from_reader(data.as_bytes(), Some("Adj Close"));
    assert!(matches!(result, Err(CapmError::InvalidInput(_))));
}

#[test]
fn test_fred_style_rates_skip_missing() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "DATE,DGS3MO").unwrap();
    writeln!(file, "2023-01-02,.").unwrap();
    writeln!(file, "2023-01-03,4.46").unwrap();
    writeln!(file, "2023-01-04,4.49").unwrap();
    writeln!(file, "2023-01-05,").unwrap();
    writeln!(file, "2023-01-06,4.63").unwrap();

    let rates = DataLoader::rates_from_csv(file.path(), None).unwrap();

    let dates: Vec<NaiveDate> = rates.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2023, 1, 3), date(2023, 1, 4), date(2023, 1, 6)]
    );
    assert_eq!(rates[0].annual_rate_pct, 4.46);
}

#[test]
fn test_bad_date_is_reported() {
    let data = "Date,Close\n03/01/2023,1.0\n";
    let result = DataLoader::prices_from_reader(data.as_bytes(), None);

    assert!(matches!(result, Err(CapmError::DateParse(_))));
}

#[test]
fn test_no_usable_rows() {
    let data = "Date,Close\n2023-01-03,null\n2023-01-04,NaN\n";
    let result = DataLoader::prices_from_reader(data.as_bytes(), None);

    assert!(matches!(result, Err(CapmError::InsufficientData(_))));
}

#[test]
fn test_missing_file() {
    let result = DataLoader::prices_from_csv("nonexistent_prices.csv", None);
    assert!(matches!(result, Err(CapmError::IoError(_))));
}
