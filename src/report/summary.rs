//! Baseline summary table and test report

use super::format::{format_float, python_repr};
use crate::analysis::{mean_present, TTestResult};
use crate::data::ProcessedTable;
use crate::error::Result;
use csv::Writer;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The four group means written to `baseline_summary.csv`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryStats {
    pub mean_return_news: Option<f64>,
    pub mean_return_no_news: Option<f64>,
    pub mean_volatility_news: Option<f64>,
    pub mean_volatility_no_news: Option<f64>,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Metric")]
    metric: &'a str,
    #[serde(rename = "Value")]
    value: String,
}

impl SummaryStats {
    /// Means of the derived columns, skipping missing values
    pub fn from_groups(news: &ProcessedTable, no_news: &ProcessedTable) -> Self {
        Self {
            mean_return_news: mean_present(news.returns()),
            mean_return_no_news: mean_present(no_news.returns()),
            mean_volatility_news: mean_present(news.volatility()),
            mean_volatility_no_news: mean_present(no_news.volatility()),
        }
    }

    /// Labelled rows, in output order
    pub fn rows(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("Mean Return (News)", self.mean_return_news),
            ("Mean Return (No News)", self.mean_return_no_news),
            ("Mean Volatility (News)", self.mean_volatility_news),
            ("Mean Volatility (No News)", self.mean_volatility_no_news),
        ]
    }

    /// Save as a `Metric,Value` CSV file
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        for (metric, value) in self.rows() {
            writer.serialize(SummaryRow {
                metric,
                value: format_float(value),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (metric, value) in self.rows() {
            let value = value.map(python_repr).unwrap_or_else(|| "n/a".to_string());
            writeln!(f, "  {:<28} {}", metric, value)?;
        }
        Ok(())
    }
}

/// Results of the return and volatility comparisons
#[derive(Debug, Clone, Copy)]
pub struct TestReport {
    pub returns: TTestResult,
    pub volatility: TTestResult,
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Return T-stat: {}, P-value: {}",
            python_repr(self.returns.statistic),
            python_repr(self.returns.p_value)
        )?;
        write!(
            f,
            "Volatility T-stat: {}, P-value: {}",
            python_repr(self.volatility.statistic),
            python_repr(self.volatility.p_value)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::welch_t_test;

    #[test]
    fn test_summary_csv_layout() {
        let stats = SummaryStats {
            mean_return_news: Some(0.0015),
            mean_return_no_news: Some(-0.00002),
            mean_volatility_news: Some(0.02),
            mean_volatility_no_news: None,
        };

        let mut out = Vec::new();
        stats.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Metric,Value\n\
             Mean Return (News),0.0015\n\
             Mean Return (No News),-2e-05\n\
             Mean Volatility (News),0.02\n\
             Mean Volatility (No News),\n"
        );
    }

    #[test]
    fn test_report_lines() {
        let report = TestReport {
            returns: welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]),
            volatility: welch_t_test(&[1.0], &[2.0]),
        };
        let text = report.to_string();
        let mut lines = text.lines();

        assert!(lines
            .next()
            .unwrap()
            .starts_with("Return T-stat: -1.897366596101027"));
        assert_eq!(lines.next().unwrap(), "Volatility T-stat: nan, P-value: nan");
    }
}
