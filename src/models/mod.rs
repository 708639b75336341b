//! Core data models for chat-ledger
//!
//! This module contains the data structures of the ledger domain: the fixed
//! category set, monetary amounts, stored transactions and report periods.

pub mod category;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::Category;
pub use money::Money;
pub use period::{MonthPeriod, PeriodParseError, TimeRange, YearPeriod};
pub use transaction::Transaction;
