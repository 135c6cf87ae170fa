//! Trading date parsing and formatting
//!
//! Dates are kept as naive local timestamps with an optional UTC offset, so a
//! table written back out looks like the one that was read in.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%Y%m%d"];

/// A single trading date as found in the `Date` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeDate {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl TradeDate {
    /// Date at midnight, no offset
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            local: date.and_time(NaiveTime::MIN),
            offset: None,
        })
    }

    /// Local wall-clock timestamp
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Point in time used for ordering; offsets are normalised to UTC
    pub fn instant(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => self.local - Duration::seconds(i64::from(offset.local_minus_utc())),
            None => self.local,
        }
    }

    /// True when the value carries more than a calendar date
    pub fn has_time(&self) -> bool {
        self.offset.is_some() || self.local.time() != NaiveTime::MIN
    }

    /// Render using the table-wide format
    pub fn format(&self, format: DateFormat) -> String {
        match (format, self.offset) {
            (DateFormat::Date, _) => self.local.format("%Y-%m-%d").to_string(),
            (DateFormat::DateTime, None) => self.local.format("%Y-%m-%d %H:%M:%S").to_string(),
            (DateFormat::DateTime, Some(offset)) => self
                .local
                .and_local_timezone(offset)
                .single()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%:z").to_string())
                .unwrap_or_else(|| self.local.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if self.has_time() {
            DateFormat::DateTime
        } else {
            DateFormat::Date
        };
        f.write_str(&self.format(format))
    }
}

/// Output format shared by every row of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Date,
    /// `YYYY-MM-DD HH:MM:SS`, with offset when one was present
    DateTime,
}

impl DateFormat {
    /// Pick the narrowest format that loses nothing for the given dates
    pub fn for_dates<'a>(dates: impl IntoIterator<Item = &'a TradeDate>) -> Self {
        if dates.into_iter().any(TradeDate::has_time) {
            DateFormat::DateTime
        } else {
            DateFormat::Date
        }
    }
}

/// Parse a `Date` cell
pub fn parse_date(value: &str) -> Option<TradeDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset(dt));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(with_offset(dt));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(TradeDate {
                local,
                offset: None,
            });
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(TradeDate {
                local: date.and_time(NaiveTime::MIN),
                offset: None,
            });
        }
    }
    None
}

fn with_offset(dt: DateTime<FixedOffset>) -> TradeDate {
    TradeDate {
        local: dt.naive_local(),
        offset: Some(*dt.offset()),
    }
}
