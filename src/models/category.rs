//! The fixed set of spending categories
//!
//! Categories are assigned once at ingestion and never re-derived for a
//! stored record. The set is closed: users cannot add their own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Market,
    Food,
    Transport,
    Leisure,
    Bills,
    Income,
    Other,
}

impl Category {
    /// All categories in classification priority order, `Other` last
    pub const ALL: [Category; 7] = [
        Category::Market,
        Category::Food,
        Category::Transport,
        Category::Leisure,
        Category::Bills,
        Category::Income,
        Category::Other,
    ];

    /// Label written to the ledger and shown in reports
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Market => "Market",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Leisure => "Leisure",
            Category::Bills => "Bills",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }

    /// Portuguese label found in older ledgers
    const fn legacy_label(&self) -> &'static str {
        match self {
            Category::Market => "Mercado",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Leisure => "Lazer",
            Category::Bills => "Contas",
            Category::Income => "Receita",
            Category::Other => "Outros",
        }
    }

    /// Look up a category by its stored label (current or legacy, case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label().to_lowercase() == lowered || c.legacy_label().to_lowercase() == lowered
        })
    }

    /// Whether this category counts towards the income side of a balance
    pub const fn is_income(&self) -> bool {
        matches!(self, Category::Income)
    }

    /// Whether this category counts towards the expense side of a balance
    ///
    /// `Other` is neither income nor expense.
    pub const fn is_expense(&self) -> bool {
        !matches!(self, Category::Income | Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
