//! Tables with the derived `return` and `volatility` columns attached

use super::table::PriceTable;
use crate::error::{Error, Result};
use crate::report::format_float;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const RETURN_COLUMN: &str = "return";
pub const VOLATILITY_COLUMN: &str = "volatility";

/// A price table plus its per-row derived series
#[derive(Debug, Clone)]
pub struct ProcessedTable {
    table: PriceTable,
    returns: Vec<Option<f64>>,
    volatility: Vec<Option<f64>>,
}

impl ProcessedTable {
    /// Attach derived columns; both must have one value per row
    pub fn new(
        table: PriceTable,
        returns: Vec<Option<f64>>,
        volatility: Vec<Option<f64>>,
    ) -> Result<Self> {
        for column in [&returns, &volatility] {
            if column.len() != table.len() {
                return Err(Error::LengthMismatch {
                    expected: table.len(),
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            table,
            returns,
            volatility,
        })
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn returns(&self) -> &[Option<f64>] {
        &self.returns
    }

    pub fn volatility(&self) -> &[Option<f64>] {
        &self.volatility
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Save to a CSV file
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write every input column, then `return` and `volatility`.
    ///
    /// `Date` and `Close` are re-rendered from their parsed values; other
    /// columns keep their input text.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        let date_format = self.table.date_format();
        let date_column = self.table.date_column();
        let close_column = self.table.close_column();

        let mut header: Vec<&str> = self.table.headers().iter().collect();
        header.push(RETURN_COLUMN);
        header.push(VOLATILITY_COLUMN);
        writer.write_record(&header)?;

        for (row, record) in self.table.records().iter().enumerate() {
            let mut fields: Vec<String> = record
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    if col == date_column {
                        self.table.dates()[row].format(date_format)
                    } else if col == close_column {
                        format_float(self.table.closes()[row])
                    } else {
                        field.to_string()
                    }
                })
                .collect();
            fields.push(format_float(self.returns[row]));
            fields.push(format_float(self.volatility[row]));
            writer.write_record(&fields)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PriceTable {
        PriceTable::from_reader(
            "Date,Ticker,Close,Volume\n\
             1/2/2024,AAPL,100,5\n\
             1/3/2024,AAPL,110,6\n"
                .as_bytes(),
            Path::new("test.csv"),
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let err = ProcessedTable::new(table(), vec![None], vec![None, None]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_write_appends_derived_columns() {
        let processed =
            ProcessedTable::new(table(), vec![None, Some(0.1)], vec![None, None]).unwrap();

        let mut out = Vec::new();
        processed.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Date,Ticker,Close,Volume,return,volatility\n\
             2024-01-02,AAPL,100.0,5,,\n\
             2024-01-03,AAPL,110.0,6,0.1,\n"
        );
    }

    #[test]
    fn test_missing_close_written_as_empty_cell() {
        let table = PriceTable::from_reader(
            "Date,Ticker,Close\n\
             2024-01-02,AAPL,100\n\
             2024-01-03,AAPL,NA\n\
             2024-01-04,AAPL,null\n\
             2024-01-05,AAPL, 1.5e2 \n"
                .as_bytes(),
            Path::new("test.csv"),
        )
        .unwrap();
        let n = table.len();
        let processed = ProcessedTable::new(table, vec![None; n], vec![None; n]).unwrap();

        let mut out = Vec::new();
        processed.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Date,Ticker,Close,return,volatility\n\
             2024-01-02,AAPL,100.0,,\n\
             2024-01-03,AAPL,,,\n\
             2024-01-04,AAPL,,,\n\
             2024-01-05,AAPL,150.0,,\n"
        );
    }
}
