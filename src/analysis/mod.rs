//! Analysis module
//!
//! - `returns`: per-ticker percentage change of closes
//! - `rolling`: per-ticker trailing standard deviation of returns
//! - `statistics`: means, variances and percentiles over gappy series
//! - `ttest`: Welch's two-sample t-test

mod returns;
mod rolling;
mod statistics;
mod ttest;

pub use returns::{derive_returns, pct_change};
pub use rolling::{derive_volatility, rolling_std, DEFAULT_WINDOW};
pub use statistics::{
    mean, mean_present, percentile, percentiles, present, sample_std, sample_variance,
};
pub use ttest::{welch_t_test, TTestResult};
