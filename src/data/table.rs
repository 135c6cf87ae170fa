//! Price tables loaded from CSV
//!
//! A table keeps every input column so the processed export can reproduce it,
//! and parses the three columns the study needs: `Date`, `Ticker` and `Close`.

use super::dates::{parse_date, DateFormat, TradeDate};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATE_COLUMN: &str = "Date";
pub const TICKER_COLUMN: &str = "Ticker";
pub const CLOSE_COLUMN: &str = "Close";

/// Cell values treated as a missing close
const MISSING_TOKENS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", "None"];

/// Rows of one input dataset, in file order
#[derive(Debug, Clone)]
pub struct PriceTable {
    source: PathBuf,
    headers: StringRecord,
    records: Vec<StringRecord>,
    date_column: usize,
    close_column: usize,
    dates: Vec<TradeDate>,
    tickers: Vec<String>,
    closes: Vec<Option<f64>>,
}

impl PriceTable {
    /// Load a table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file, path)?;
        debug!(
            "Loaded {} rows ({} tickers) from {}",
            table.len(),
            table.ticker_count(),
            path.display()
        );
        Ok(table)
    }

    /// Load a table from any reader; `source` is used in error messages
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(false).from_reader(reader);
        let headers = reader.headers()?.clone();

        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn {
                    column: name.to_string(),
                    path: source.to_path_buf(),
                })
        };
        let date_column = column(DATE_COLUMN)?;
        let ticker_column = column(TICKER_COLUMN)?;
        let close_column = column(CLOSE_COLUMN)?;

        let mut records = Vec::new();
        let mut dates = Vec::new();
        let mut tickers = Vec::new();
        let mut closes = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw_date = record.get(date_column).unwrap_or("");
            let date = parse_date(raw_date).ok_or_else(|| Error::InvalidDate {
                line,
                value: raw_date.to_string(),
            })?;
            let raw_close = record.get(close_column).unwrap_or("");
            let close = parse_close(raw_close).ok_or_else(|| Error::InvalidClose {
                line,
                value: raw_close.to_string(),
            })?;

            dates.push(date);
            tickers.push(record.get(ticker_column).unwrap_or("").trim().to_string());
            closes.push(close);
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::EmptyInput(source.to_path_buf()));
        }

        Ok(Self {
            source: source.to_path_buf(),
            headers,
            records,
            date_column,
            close_column,
            dates,
            tickers,
            closes,
        })
    }

    /// Build a table directly from parsed rows
    pub fn from_rows(rows: Vec<(TradeDate, String, Option<f64>)>) -> Self {
        let headers = StringRecord::from(vec![DATE_COLUMN, TICKER_COLUMN, CLOSE_COLUMN]);
        let mut records = Vec::with_capacity(rows.len());
        let mut dates = Vec::with_capacity(rows.len());
        let mut tickers = Vec::with_capacity(rows.len());
        let mut closes = Vec::with_capacity(rows.len());

        for (date, ticker, close) in rows {
            let close_text = close.map(|c| c.to_string()).unwrap_or_default();
            records.push(StringRecord::from(vec![
                date.to_string(),
                ticker.clone(),
                close_text,
            ]));
            dates.push(date);
            tickers.push(ticker);
            closes.push(close);
        }

        Self {
            source: PathBuf::from("<memory>"),
            headers,
            records,
            date_column: 0,
            close_column: 2,
            dates,
            tickers,
            closes,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Where the table was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn date_column(&self) -> usize {
        self.date_column
    }

    pub fn close_column(&self) -> usize {
        self.close_column
    }

    pub fn dates(&self) -> &[TradeDate] {
        &self.dates
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn closes(&self) -> &[Option<f64>] {
        &self.closes
    }

    /// Output format for the `Date` column
    pub fn date_format(&self) -> DateFormat {
        DateFormat::for_dates(&self.dates)
    }

    /// Number of distinct tickers
    pub fn ticker_count(&self) -> usize {
        self.ticker_groups().len()
    }

    /// Row indices per ticker, in order of first appearance.
    ///
    /// Each group is sorted by date; rows sharing a date keep their file order.
    /// Rows with an empty ticker belong to no group.
    pub fn ticker_groups(&self) -> Vec<Vec<usize>> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (row, ticker) in self.tickers.iter().enumerate() {
            if ticker.is_empty() {
                continue;
            }
            let slot = *slots.entry(ticker.as_str()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(row);
        }

        for group in &mut groups {
            group.sort_by_key(|&row| self.dates[row].instant());
        }
        groups
    }
}

/// Parse a `Close` cell; `Some(None)` is a missing value, `None` is garbage
fn parse_close(value: &str) -> Option<Option<f64>> {
    let value = value.trim();
    if MISSING_TOKENS.contains(&value) {
        return Some(None);
    }
    match value.parse::<f64>() {
        Ok(close) if close.is_nan() => Some(None),
        Ok(close) => Some(Some(close)),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<PriceTable> {
        PriceTable::from_reader(csv.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_load_keeps_extra_columns() {
        let table = load(
            "Date,Open,Close,Ticker\n\
             2024-01-02,10.0,10.5,AAPL\n\
             2024-01-03,10.5,11.0,AAPL\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.closes(), &[Some(10.5), Some(11.0)]);
        assert_eq!(table.tickers()[0], "AAPL");
        assert_eq!(table.date_column(), 0);
        assert_eq!(table.close_column(), 2);
    }

    #[test]
    fn test_missing_close_is_none() {
        let table = load("Date,Ticker,Close\n2024-01-02,MSFT,\n2024-01-03,MSFT,NaN\n").unwrap();
        assert_eq!(table.closes(), &[None, None]);
    }

    #[test]
    fn test_missing_column_error() {
        let err = load("Date,Symbol,Close\n2024-01-02,MSFT,1.0\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "Ticker"));
    }

    #[test]
    fn test_invalid_close_reports_line() {
        let err = load("Date,Ticker,Close\n2024-01-02,MSFT,1.0\n2024-01-03,MSFT,abc\n").unwrap_err();
        match err {
            Error::InvalidClose { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = load("Date,Ticker,Close\n").unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn test_ticker_groups_sorted_by_date() {
        let table = load(
            "Date,Ticker,Close\n\
             2024-01-03,AAPL,2.0\n\
             2024-01-02,MSFT,5.0\n\
             2024-01-02,AAPL,1.0\n\
             2024-01-03,MSFT,6.0\n",
        )
        .unwrap();

        let groups = table.ticker_groups();
        assert_eq!(groups, vec![vec![2, 0], vec![1, 3]]);
        assert_eq!(table.ticker_count(), 2);
    }

    #[test]
    fn test_empty_ticker_rows_are_ungrouped() {
        let table = load(
            "Date,Ticker,Close\n\
             2024-01-02,,1.0\n\
             2024-01-02,AAPL,5.0\n\
             2024-01-03,,1.1\n\
             2024-01-03,AAPL,6.0\n",
        )
        .unwrap();

        assert_eq!(table.ticker_groups(), vec![vec![1, 3]]);
        assert_eq!(table.ticker_count(), 1);
    }
}
