//! Ingestion service
//!
//! Joins the two ingestion steps: classify the text, then append the
//! classified record to the ledger store.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::LedgerStore;

use super::classifier::CategoryClassifier;

/// Service for recording incoming messages
pub struct LedgerService<'a> {
    store: &'a dyn LedgerStore,
    classifier: &'a CategoryClassifier,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a dyn LedgerStore, classifier: &'a CategoryClassifier) -> Self {
        Self { store, classifier }
    }

    /// Record a message stamped with the current local time
    pub fn record(&self, user: &str, raw_message: &str) -> LedgerResult<Transaction> {
        self.record_at(user, raw_message, Local::now().naive_local())
    }

    /// Record a message stamped at `received_at`
    pub fn record_at(
        &self,
        user: &str,
        raw_message: &str,
        received_at: NaiveDateTime,
    ) -> LedgerResult<Transaction> {
        let category = self.classifier.classify(raw_message);
        let txn = Transaction::new(user, received_at, raw_message, category);

        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.store.append(&txn)?;
        debug!(user, %category, "message ingested");

        Ok(txn)
    }
}
