//! Service layer for chat-ledger
//!
//! The pure rules (classification, amount extraction) and the thin ingestion
//! service that joins classification to the ledger store.

pub mod classifier;
pub mod extractor;
pub mod ledger;

pub use classifier::{CategoryClassifier, KeywordTable};
pub use extractor::ValueExtractor;
pub use ledger::LedgerService;
