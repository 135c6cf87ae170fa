//! Data module
//!
//! Loading the news / non-news price datasets and exporting processed tables.

mod dates;
mod processed;
mod table;

pub use dates::{parse_date, DateFormat, TradeDate};
pub use processed::{ProcessedTable, RETURN_COLUMN, VOLATILITY_COLUMN};
pub use table::{PriceTable, CLOSE_COLUMN, DATE_COLUMN, TICKER_COLUMN};
