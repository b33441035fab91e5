//! Export output

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Office Open XML spreadsheet
    Xlsx,
    /// Paginated PDF document
    Pdf,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => ".xlsx",
            ExportFormat::Pdf => ".pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// The finished export: bytes plus metadata. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    bytes: Vec<u8>,
    filename: String,
    format: ExportFormat,
    generated_at: NaiveDateTime,
    row_count: usize,
}

impl ExportResult {
    pub(crate) fn new(
        bytes: Vec<u8>,
        filename: String,
        format: ExportFormat,
        generated_at: NaiveDateTime,
        row_count: usize,
    ) -> Self {
        Self {
            bytes,
            filename,
            format,
            generated_at,
            row_count,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// Data rows exported, summed across sheets
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }
}
