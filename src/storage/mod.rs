//! Storage layer for chat-ledger
//!
//! The ledger is a single append-only table shared by every user. Stores are
//! partitioned by user only at query time.

pub mod csv_ledger;
pub mod file_io;
pub mod memory;

pub use csv_ledger::CsvLedgerStore;
pub use file_io::{append_row, read_rows, LedgerRow};
pub use memory::MemoryLedgerStore;

use crate::error::LedgerResult;
use crate::models::{TimeRange, Transaction};

/// Append-only record of every ingested message
///
/// Implementations must keep records in append order, must never drop a
/// record when appends race, and must never hand a partially written record
/// to `query`.
pub trait LedgerStore: Send + Sync {
    /// Durably add one record
    fn append(&self, transaction: &Transaction) -> LedgerResult<()>;

    /// Every record of `user` in append order, optionally restricted to `range`
    ///
    /// A user with no records, or a store that was never written to, yields
    /// an empty vector.
    fn query(&self, user: &str, range: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for std::sync::Arc<S> {
    fn append(&self, transaction: &Transaction) -> LedgerResult<()> {
        (**self).append(transaction)
    }

    fn query(&self, user: &str, range: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>> {
        (**self).query(user, range)
    }
}

/// Shared filter applied by every store implementation
pub(crate) fn matches(txn: &Transaction, user: &str, range: Option<&TimeRange>) -> bool {
    txn.user == user && range.map_or(true, |r| txn.is_within(r))
}
