//! chat-ledger - chat-driven personal expense ledger
//!
//! Users send short free-text messages such as "almoço 25" or "recebi 1000
//! salário". Each message is filed under a spending category by keyword
//! matching and appended verbatim to a per-user ledger. Monetary values are
//! extracted from the stored text only when a report is requested.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, money, periods, transactions)
//! - `services`: Keyword classification, amount extraction and ingestion
//! - `storage`: Append-only CSV ledger and an in-memory store
//! - `reports`: Balance and category breakdown reports
//! - `bot`: Chat commands and the replies sent back to the user
//! - `cli`: Command-line stand-in for the chat transport
//!
//! # Example
//!
//! ```rust,ignore
//! use chat_ledger::bot::FinanceBot;
//! use chat_ledger::services::CategoryClassifier;
//! use chat_ledger::storage::CsvLedgerStore;
//!
//! let bot = FinanceBot::new(CsvLedgerStore::new(path), CategoryClassifier::default(), "R$");
//! println!("{}", bot.dispatch("ana", "almoço 25"));
//! ```

pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::LedgerError;
