//! Balance report
//!
//! Income is the sum of amounts of `Income` records; expenses are the sum of
//! every other category except `Other`, which counts towards neither side.

use crate::models::{Money, Transaction};
use crate::services::ValueExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub user: String,
    pub income: Money,
    pub expense: Money,
    /// Records considered, including those classified `Other`
    pub transaction_count: usize,
}

impl BalanceReport {
    /// Fold a user's transactions into income and expense totals
    pub fn from_transactions(
        user: &str,
        transactions: &[Transaction],
        extractor: &ValueExtractor,
    ) -> Self {
        let mut income = Money::zero();
        let mut expense = Money::zero();

        for txn in transactions {
            if txn.category.is_income() {
                income += extractor.extract_amount(&txn.raw_message);
            } else if txn.category.is_expense() {
                expense += extractor.extract_amount(&txn.raw_message);
            }
        }

        Self {
            user: user.to_string(),
            income,
            expense,
            transaction_count: transactions.len(),
        }
    }

    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    /// Format the report for chat or terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        format!(
            "Your approximate balance:\n\n\
             Total income: {}\n\
             Total expenses: {}\n\
             Final balance: {}",
            self.income.format_with_symbol(currency),
            self.expense.format_with_symbol(currency),
            self.balance().format_with_symbol(currency),
        )
    }
}
