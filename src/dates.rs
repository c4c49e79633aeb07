//! Date utilities
//!
//! All dates entered and displayed by the school use the fixed `DD/MM/YYYY`
//! pattern. Parsing is strict: two-digit day and month, four-digit year,
//! and the result must be a real calendar day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The textual pattern used for every date in the application
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `DD/MM/YYYY` string into a calendar date
///
/// # Examples
/// ```
/// use phison_admin::dates;
/// let date = dates::parse("05/06/2025").unwrap();
/// assert_eq!(dates::format(date), "05/06/2025");
/// ```
pub fn parse(text: &str) -> Result<NaiveDate, DateParseError> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return Err(DateParseError::InvalidFormat(text.to_string()));
    }

    let widths = [2, 2, 4];
    for (part, width) in parts.iter().zip(widths) {
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateParseError::InvalidFormat(text.to_string()));
        }
    }

    // Widths and digits were checked above
    let day: u32 = parts[0]
        .parse()
        .map_err(|_| DateParseError::InvalidFormat(text.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| DateParseError::InvalidFormat(text.to_string()))?;
    let year: i32 = parts[2]
        .parse()
        .map_err(|_| DateParseError::InvalidFormat(text.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(DateParseError::MonthOutOfRange(month));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::DayOutOfRange {
        day,
        month,
        year,
    })
}

/// Format a date as `DD/MM/YYYY`
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole days from `reference` to `target` (negative when `target` is earlier)
pub fn days_until(target: NaiveDate, reference: NaiveDate) -> i64 {
    (target - reference).num_days()
}

/// Calendar month (1-12)
pub fn month_of(date: NaiveDate) -> u32 {
    date.month()
}

/// Day of month and month
pub fn day_month_of(date: NaiveDate) -> (u32, u32) {
    (date.day(), date.month())
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A month of a specific year, used to select ledger rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The year-month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `MM/YYYY`
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let text = text.trim();
        let (month, year) = text
            .split_once('/')
            .ok_or_else(|| DateParseError::InvalidFormat(text.to_string()))?;
        if month.len() != 2 || year.len() != 4 {
            return Err(DateParseError::InvalidFormat(text.to_string()));
        }
        let month: u32 = month
            .parse()
            .map_err(|_| DateParseError::InvalidFormat(text.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DateParseError::InvalidFormat(text.to_string()))?;
        Self::new(year, month)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Day and month of a birth date, displayed as `DD/MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Birthday {
    pub day: u32,
    pub month: u32,
}

impl Birthday {
    /// Derive the birthday from a full birth date
    pub fn of(date: NaiveDate) -> Self {
        let (day, month) = day_month_of(date);
        Self { day, month }
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

/// Error type for date parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    InvalidFormat(String),
    MonthOutOfRange(u32),
    DayOutOfRange { day: u32, month: u32, year: i32 },
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "'{}' is not in DD/MM/YYYY format", s),
            Self::MonthOutOfRange(m) => write!(f, "month {} is out of range", m),
            Self::DayOutOfRange { day, month, year } => {
                write!(f, "day {} does not exist in {:02}/{}", day, month, year)
            }
        }
    }
}

impl std::error::Error for DateParseError {}
