//! Error types for report export

use crate::archive::ArchiveError;
use crate::pdf::PdfError;
use crate::validation::ValidationReport;
use crate::xlsx::XlsxError;
use layout_engine::LayoutError;
use report_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export request: {0}")]
    Validation(ValidationReport),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Request parse error: {0}")]
    Request(#[from] serde_json::Error),
}

impl ExportError {
    /// Validation issues, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            ExportError::Validation(report) => Some(&report.errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
