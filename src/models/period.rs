//! Report periods and time ranges
//!
//! A [`TimeRange`] is the half-open `[start, end)` window the ledger store
//! filters on. [`MonthPeriod`] and [`YearPeriod`] are validated calendar
//! periods that convert into such a window.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole days from `first` (inclusive) to `next` (exclusive)
    pub fn days(first: NaiveDate, next: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: next.and_time(NaiveTime::MIN),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    /// Not of the `MM/YYYY` or `YYYY` shape
    InvalidFormat(String),
    /// Month outside 1-12
    InvalidMonth(u32),
    /// Year not written with four digits
    InvalidYear(i64),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

const MIN_YEAR: i64 = 1000;
const MAX_YEAR: i64 = 9999;

fn validate_year(year: i64) -> Result<i32, PeriodParseError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year as i32)
    } else {
        Err(PeriodParseError::InvalidYear(year))
    }
}

fn parse_number(s: &str) -> Result<i64, PeriodParseError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeriodParseError::InvalidFormat(s.to_string()));
    }
    s.parse()
        .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))
}

/// A calendar month of a four-digit year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    first_day: NaiveDate,
    next_first_day: NaiveDate,
}

impl MonthPeriod {
    pub fn new(month: u32, year: i64) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        let year = validate_year(year)?;

        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(PeriodParseError::InvalidMonth(month))?;
        let next_first_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .ok_or(PeriodParseError::InvalidYear(i64::from(year)))?;

        Ok(Self {
            first_day,
            next_first_day,
        })
    }

    /// Parse the `MM/YYYY` shape (e.g. "06/2025" or "6/2025")
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let (month, year) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let month = u32::try_from(parse_number(month)?)
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(month, parse_number(year)?)
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::days(self.first_day, self.next_first_day)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month(), self.year())
    }
}

/// A four-digit calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPeriod {
    year: i32,
}

impl YearPeriod {
    pub fn new(year: i64) -> Result<Self, PeriodParseError> {
        Ok(Self {
            year: validate_year(year)?,
        })
    }

    /// Parse the `YYYY` shape
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        Self::new(parse_number(s)?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn range(&self) -> TimeRange {
        // Years are bounded to four digits, so both dates exist
        let first = NaiveDate::from_yo_opt(self.year, 1).unwrap_or(NaiveDate::MIN);
        let next = NaiveDate::from_yo_opt(self.year + 1, 1).unwrap_or(NaiveDate::MAX);
        TimeRange::days(first, next)
    }
}

impl fmt::Display for YearPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}
