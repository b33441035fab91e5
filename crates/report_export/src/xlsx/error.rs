//! Error types for XLSX generation

use crate::archive::ArchiveError;
use thiserror::Error;

/// Errors that can occur while building a workbook
#[derive(Debug, Error)]
pub enum XlsxError {
    /// Packaging the parts failed
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// A workbook needs at least one sheet
    #[error("Workbook has no sheets")]
    NoSheets,

    /// A sheet exceeds the worksheet row limit
    #[error("Sheet '{sheet}' has {rows} rows, more than a worksheet holds")]
    TooManyRows { sheet: String, rows: usize },

    /// A sheet exceeds the worksheet column limit
    #[error("Sheet '{sheet}' has {columns} columns, more than a worksheet holds")]
    TooManyColumns { sheet: String, columns: usize },

    /// A string cell was written without a shared-string entry
    #[error("String not in shared string table: {0:?}")]
    MissingSharedString(String),
}

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;
