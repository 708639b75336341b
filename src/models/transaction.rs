//! Transaction model
//!
//! A transaction is one ingested chat message together with who sent it, when
//! it was received and the category it was given. Its monetary amount is not
//! part of the record: reports derive it from `raw_message` every time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use super::category::Category;
use super::period::TimeRange;

/// Format used when writing timestamps to the ledger
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp, tolerating the shapes older ledgers contain
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// A recorded chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Chat handle of the sender
    pub user: String,

    /// Ingestion time, second precision
    ///
    /// `None` only for records read back from a ledger whose timestamp
    /// could not be interpreted.
    pub timestamp: Option<NaiveDateTime>,

    /// Message text exactly as received
    pub raw_message: String,

    pub category: Category,
}

impl Transaction {
    /// Create a new transaction stamped at `timestamp` (sub-second part dropped)
    pub fn new(
        user: impl Into<String>,
        timestamp: NaiveDateTime,
        raw_message: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            user: user.into(),
            timestamp: timestamp.with_nanosecond(0).or(Some(timestamp)),
            raw_message: raw_message.into(),
            category,
        }
    }

    /// Whether the transaction has a usable timestamp inside `range`
    pub fn is_within(&self, range: &TimeRange) -> bool {
        self.timestamp.is_some_and(|ts| range.contains(ts))
    }

    /// Timestamp as written to the ledger, empty when unknown
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Validate the transaction before it is appended
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.user.trim().is_empty() {
            return Err(TransactionValidationError::EmptyUser);
        }
        if self.timestamp.is_none() {
            return Err(TransactionValidationError::MissingTimestamp);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.formatted_timestamp(),
            self.user,
            self.category,
            self.raw_message
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyUser,
    MissingTimestamp,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUser => write!(f, "Transaction user must not be empty"),
            Self::MissingTimestamp => write!(f, "Transaction must carry a timestamp"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
