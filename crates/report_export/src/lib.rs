//! Report Export - XLSX and PDF generation for tabular reports
//!
//! This crate turns typed columns and rows into a stored-ZIP spreadsheet or
//! a paginated PDF, with every byte of both containers produced here:
//! archive headers and checksums, spreadsheet XML parts, PDF objects and the
//! cross-reference table. Requests are validated up front, and every export
//! call builds its own string pool, archive, and object table.

mod api;
pub mod archive;
mod color;
mod error;
mod filename;
mod options;
pub mod pdf;
mod progress;
mod request;
mod result;
mod validation;
pub mod xlsx;

pub use api::{export, export_document, export_spreadsheet, Exporter};
pub use color::RgbColor;
pub use error::{ExportError, Result};
pub use filename::{build_filename, slugify};
pub use options::{ExportOptions, Styling, SummaryItem};
pub use progress::{ExportPhase, ExportProgress};
pub use request::{ColumnDocument, ExportRequest, ExportRequestDocument, SheetDocument};
pub use result::{ExportFormat, ExportResult};
pub use validation::{validate_request, ValidationReport};

// Re-export the model and page setup types used in requests
pub use layout_engine::{Margins, Orientation, PageSize};
pub use report_model::{
    Accessor, Alignment, CellValue, DataType, ExportColumn, ExportTable, FormattedCell, Record,
};
