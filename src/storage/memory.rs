//! In-process ledger store
//!
//! Keeps records in a vector. Used where durability is not needed, such as
//! tests that inject their own store.

use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{TimeRange, Transaction};

use super::{matches, LedgerStore};

#[derive(Default)]
pub struct MemoryLedgerStore {
    records: RwLock<Vec<Transaction>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all users
    pub fn len(&self) -> LedgerResult<usize> {
        let records = self.records.read().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn append(&self, transaction: &Transaction) -> LedgerResult<()> {
        let mut records = self.records.write().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        records.push(transaction.clone());
        Ok(())
    }

    fn query(&self, user: &str, range: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>> {
        let records = self.records.read().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records
            .iter()
            .filter(|txn| matches(txn, user, range))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_append_and_query() {
        let store = MemoryLedgerStore::new();
        assert!(store.is_empty().unwrap());

        let when = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        store
            .append(&Transaction::new("ana", when, "almoço 25", Category::Food))
            .unwrap();
        store
            .append(&Transaction::new("bia", when, "uber 15", Category::Transport))
            .unwrap();

        assert_eq!(store.len().unwrap(), 2);
        let ana = store.query("ana", None).unwrap();
        assert_eq!(ana.len(), 1);
        assert_eq!(ana[0].category, Category::Food);
    }
}
