//! Report module
//!
//! Summary statistics, test results and the number formatting shared by the
//! CSV exports and plot titles.

mod format;
mod summary;

pub use format::{format_fixed, format_float, format_sci, python_repr};
pub use summary::{SummaryStats, TestReport};
