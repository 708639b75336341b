//! Reports module for chat-ledger
//!
//! Every report follows the same shape: fetch a user's transactions from the
//! ledger store (optionally time-filtered), recompute each amount from its
//! message text, fold by category, then format.

pub mod balance;
pub mod breakdown;

pub use balance::BalanceReport;
pub use breakdown::{CategoryBreakdown, ReportWindow};

use tracing::debug;

use crate::error::LedgerResult;
use crate::models::{MonthPeriod, YearPeriod};
use crate::services::ValueExtractor;
use crate::storage::LedgerStore;

/// Result of a report query that ran successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome<T> {
    /// The report has something to show
    Ready(T),
    /// The user has never recorded anything
    NoData,
    /// The user has records, but none with a positive amount in the window
    NoValues(ReportWindow),
}

impl<T> ReportOutcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            _ => None,
        }
    }
}

/// Computes balances and breakdowns from the ledger
pub struct ReportEngine<'a> {
    store: &'a dyn LedgerStore,
    extractor: ValueExtractor,
}

impl<'a> ReportEngine<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self {
            store,
            extractor: ValueExtractor::new(),
        }
    }

    /// Income, expenses and final balance over all of a user's records
    pub fn balance(&self, user: &str) -> LedgerResult<ReportOutcome<BalanceReport>> {
        let transactions = self.store.query(user, None)?;
        if transactions.is_empty() {
            return Ok(ReportOutcome::NoData);
        }

        Ok(ReportOutcome::Ready(BalanceReport::from_transactions(
            user,
            &transactions,
            &self.extractor,
        )))
    }

    /// Totals per category over all of a user's records
    pub fn category_breakdown(&self, user: &str) -> LedgerResult<ReportOutcome<CategoryBreakdown>> {
        self.breakdown(user, ReportWindow::AllTime)
    }

    /// Totals per category for one calendar month
    pub fn monthly_breakdown(
        &self,
        user: &str,
        period: MonthPeriod,
    ) -> LedgerResult<ReportOutcome<CategoryBreakdown>> {
        self.breakdown(user, ReportWindow::Month(period))
    }

    /// Totals per category for one calendar year
    pub fn yearly_breakdown(
        &self,
        user: &str,
        period: YearPeriod,
    ) -> LedgerResult<ReportOutcome<CategoryBreakdown>> {
        self.breakdown(user, ReportWindow::Year(period))
    }

    fn breakdown(
        &self,
        user: &str,
        window: ReportWindow,
    ) -> LedgerResult<ReportOutcome<CategoryBreakdown>> {
        let range = window.range();
        let transactions = self.store.query(user, range.as_ref())?;

        if transactions.is_empty() {
            // An empty window only means "no data" if the user has no history at all
            let has_history = range.is_some() && !self.store.query(user, None)?.is_empty();
            return Ok(if has_history {
                ReportOutcome::NoValues(window)
            } else {
                ReportOutcome::NoData
            });
        }

        let report = CategoryBreakdown::from_transactions(window, &transactions, &self.extractor);
        debug!(user, %window, categories = report.totals().len(), "breakdown computed");

        if report.is_empty() {
            Ok(ReportOutcome::NoValues(window))
        } else {
            Ok(ReportOutcome::Ready(report))
        }
    }
}
