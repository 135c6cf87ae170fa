//! # News Event Study
//!
//! Compares stock daily returns and rolling volatility on days with news
//! coverage against days without it.
//!
//! ## Modules
//!
//! - `data`: loading the two price datasets and exporting processed tables
//! - `analysis`: per-ticker returns, rolling volatility, Welch's t-test
//! - `report`: summary table, test results, number formatting
//! - `plot`: histogram rendering to PNG
//! - `study`: the end-to-end pipeline
//! - `utils`: configuration and logging
//!
//! ## Example
//!
//! ```no_run
//! use news_event_study::{Config, EventStudy};
//!
//! fn main() -> anyhow::Result<()> {
//!     let outcome = EventStudy::new(Config::default()).run()?;
//!     println!("{}", outcome.tests);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod plot;
pub mod report;
pub mod study;
pub mod utils;

pub use analysis::{welch_t_test, TTestResult};
pub use data::{PriceTable, ProcessedTable, TradeDate};
pub use error::{Error, Result};
pub use report::{SummaryStats, TestReport};
pub use study::{EventStudy, StudyOutcome};
pub use utils::{setup_logging, Config};
