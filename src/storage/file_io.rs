//! CSV file helpers for the ledger table
//!
//! One row per transaction with the columns `Usuario`, `DataHora`,
//! `Mensagem` and `Categoria`. Rows are appended with a single write so a
//! concurrent reader never sees half of one.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::parse_timestamp;
use crate::models::{Category, Transaction};

/// A ledger row exactly as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Usuario")]
    pub user: String,

    #[serde(rename = "DataHora")]
    pub timestamp: String,

    #[serde(rename = "Mensagem")]
    pub message: String,

    #[serde(rename = "Categoria")]
    pub category: String,
}

impl From<&Transaction> for LedgerRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            user: txn.user.clone(),
            timestamp: txn.formatted_timestamp(),
            message: txn.raw_message.clone(),
            category: txn.category.label().to_string(),
        }
    }
}

impl LedgerRow {
    /// Whether the row repeats the column header
    fn is_header(&self) -> bool {
        self.user == "Usuario"
            && self.timestamp == "DataHora"
            && self.message == "Mensagem"
            && self.category == "Categoria"
    }
}

/// Decode a stored row
///
/// A category label outside the known set reads as `Category::Other`, so the
/// record shows up in breakdowns under "Other" and counts toward neither
/// side of the balance.
impl From<LedgerRow> for Transaction {
    fn from(row: LedgerRow) -> Self {
        let timestamp = parse_timestamp(&row.timestamp);
        if timestamp.is_none() {
            warn!(user = %row.user, raw = %row.timestamp, "unreadable ledger timestamp");
        }

        let category = Category::from_label(&row.category).unwrap_or_else(|| {
            warn!(
                user = %row.user,
                label = %row.category,
                "unknown category label, reading as Other (excluded from balance totals)"
            );
            Category::Other
        });

        Transaction {
            user: row.user,
            timestamp,
            raw_message: row.message,
            category,
        }
    }
}

/// Read every row of the ledger, in file order
///
/// A missing file reads as an empty ledger. Rows that cannot be decoded are
/// skipped with a warning.
pub fn read_rows<P: AsRef<Path>>(path: P) -> LedgerResult<Vec<LedgerRow>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to open {}: {}", path.display(), e))
        })?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<LedgerRow>().enumerate() {
        match result {
            Ok(row) if row.is_header() => {
                warn!(row = index + 1, "skipping repeated header row");
            }
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => {
                return Err(LedgerError::StorageUnavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
            Err(e) => warn!(row = index + 1, error = %e, "skipping malformed ledger row"),
        }
    }

    Ok(rows)
}

/// Append one row, writing the header first if this call creates the file
/// or finds it empty
pub fn append_row<P: AsRef<Path>>(path: P, row: &LedgerRow) -> LedgerResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::StorageUnavailable(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // The process that creates the file writes the header. A header repeated
    // by a writer racing on an empty file is skipped by `read_rows`.
    let open_err = |e: std::io::Error| {
        LedgerError::StorageUnavailable(format!("Failed to open {}: {}", path.display(), e))
    };
    let (mut file, needs_header) = match OpenOptions::new().append(true).create_new(true).open(path)
    {
        Ok(file) => (file, true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let file = OpenOptions::new().append(true).open(path).map_err(open_err)?;
            let empty = file.metadata().map_err(open_err)?.len() == 0;
            (file, empty)
        }
        Err(e) => return Err(open_err(e)),
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(Vec::new());
    writer.serialize(row)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::StorageUnavailable(format!("Failed to encode row: {}", e)))?;

    file.write_all(&bytes)
        .map_err(|e| LedgerError::StorageUnavailable(format!("Failed to append row: {}", e)))?;
    file.sync_data()
        .map_err(|e| LedgerError::StorageUnavailable(format!("Failed to sync ledger: {}", e)))?;

    Ok(())
}
