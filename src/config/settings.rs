//! User settings for chat-ledger
//!
//! Settings are stored as JSON next to the data directory. Every field has a
//! default so older or hand-edited files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Settings for chat-ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency prefix used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default tracing filter when `CHAT_LEDGER_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Alternate location of the ledger table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
            ledger_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve where the ledger table lives
    pub fn ledger_path(&self, paths: &LedgerPaths) -> PathBuf {
        self.ledger_file
            .clone()
            .unwrap_or_else(|| paths.ledger_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "R$");
        assert_eq!(settings.log_level, "warn");
        assert!(settings.ledger_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"log_level": "debug"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.currency_symbol, "R$");
    }

    #[test]
    fn test_ledger_path_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.ledger_path(&paths), paths.ledger_file());

        settings.ledger_file = Some(temp_dir.path().join("shared.csv"));
        assert_eq!(settings.ledger_path(&paths), temp_dir.path().join("shared.csv"));
    }
}
