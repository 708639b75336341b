//! Configuration module for chat-ledger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Persisted settings (currency symbol, log level, ledger location)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
