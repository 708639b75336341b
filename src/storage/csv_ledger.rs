//! CSV-backed ledger store
//!
//! All users share one file. An in-process lock serialises appends and keeps
//! queries from reading while a row is being written.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{TimeRange, Transaction};

use super::file_io::{append_row, read_rows, LedgerRow};
use super::{matches, LedgerStore};

/// Ledger store persisted as a flat CSV table
pub struct CsvLedgerStore {
    path: PathBuf,
    io_lock: RwLock<()>,
}

impl CsvLedgerStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            io_lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of readable records across all users
    pub fn count(&self) -> LedgerResult<usize> {
        let _guard = self.io_lock.read().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(read_rows(&self.path)?.len())
    }
}

impl LedgerStore for CsvLedgerStore {
    fn append(&self, transaction: &Transaction) -> LedgerResult<()> {
        let _guard = self.io_lock.write().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        append_row(&self.path, &LedgerRow::from(transaction)).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "ledger append failed");
        })?;

        info!(user = %transaction.user, category = %transaction.category, "transaction recorded");
        Ok(())
    }

    fn query(&self, user: &str, range: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>> {
        let _guard = self.io_lock.read().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let rows = read_rows(&self.path).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "ledger query failed");
        })?;

        Ok(rows
            .into_iter()
            .filter(|row| row.user == user)
            .map(Transaction::from)
            .filter(|txn| matches(txn, user, range))
            .collect())
    }
}
