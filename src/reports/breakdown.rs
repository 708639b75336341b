//! Category breakdown report
//!
//! Accumulates the positive amounts of a user's records per category, in the
//! order categories are first seen. Records of every category count here,
//! `Income` and `Other` included.

use std::fmt;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, MonthPeriod, TimeRange, Transaction, YearPeriod};
use crate::services::ValueExtractor;

/// The slice of time a breakdown covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    AllTime,
    Month(MonthPeriod),
    Year(YearPeriod),
}

impl ReportWindow {
    /// Time filter to hand to the ledger store
    pub fn range(&self) -> Option<TimeRange> {
        match self {
            ReportWindow::AllTime => None,
            ReportWindow::Month(period) => Some(period.range()),
            ReportWindow::Year(period) => Some(period.range()),
        }
    }

    /// Heading shown above the category lines
    pub fn title(&self) -> String {
        match self {
            ReportWindow::AllTime => "Summary by category:".to_string(),
            ReportWindow::Month(period) => format!("Summary for {}:", period),
            ReportWindow::Year(period) => format!("Yearly summary {}:", period),
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWindow::AllTime => write!(f, "all"),
            ReportWindow::Month(period) => write!(f, "{}", period),
            ReportWindow::Year(period) => write!(f, "{}", period),
        }
    }
}

/// Totals per category over a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub window: ReportWindow,
    totals: Vec<(Category, Money)>,
}

impl CategoryBreakdown {
    /// Fold transactions into per-category totals
    ///
    /// Only strictly positive amounts are accumulated, so a category whose
    /// records carry no number never appears.
    pub fn from_transactions(
        window: ReportWindow,
        transactions: &[Transaction],
        extractor: &ValueExtractor,
    ) -> Self {
        let mut totals: Vec<(Category, Money)> = Vec::new();

        for txn in transactions {
            let amount = extractor.extract_amount(&txn.raw_message);
            if !amount.is_positive() {
                continue;
            }

            match totals.iter_mut().find(|(c, _)| *c == txn.category) {
                Some((_, total)) => *total += amount,
                None => totals.push((txn.category, amount)),
            }
        }

        Self { window, totals }
    }

    /// Category totals in first-seen order
    pub fn totals(&self) -> &[(Category, Money)] {
        &self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Format the report for chat or terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = self.window.title();
        output.push('\n');

        for (category, total) in &self.totals {
            output.push_str(&format!(
                "\n{}: {}",
                category,
                total.format_with_symbol(currency)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Period", "Category", "Amount"])
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        let period = self.window.to_string();
        for (category, total) in &self.totals {
            csv_writer
                .write_record([
                    period.as_str(),
                    category.label(),
                    total.to_decimal_string().as_str(),
                ])
                .map_err(|e| LedgerError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;

        Ok(())
    }
}
