//! Path management for chat-ledger
//!
//! ## Path Resolution Order
//!
//! 1. `CHAT_LEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/chat-ledger` or `~/.config/chat-ledger`
//! 3. Windows: `%APPDATA%\chat-ledger`

use std::path::PathBuf;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CHAT_LEDGER_DATA_DIR";

/// Manages all paths used by chat-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/chat-ledger/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default path of the shared ledger table
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("gastos.csv")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if settings have been persisted
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                LedgerError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("chat-ledger"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LedgerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("chat-ledger"))
}
