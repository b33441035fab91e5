//! XLSX Export Module
//!
//! Produces an Office Open XML spreadsheet from one or more tables. The
//! parts are plain XML strings packaged by the stored archive writer.
//!
//! ## Structure
//!
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `docProps/core.xml`, `docProps/app.xml` - Document properties
//! - `xl/workbook.xml` - Sheet list, filter names, calculation flags
//! - `xl/_rels/workbook.xml.rels` - Workbook relationships
//! - `xl/styles.xml` - The fixed style palette
//! - `xl/sharedStrings.xml` - Deduplicated strings
//! - `xl/worksheets/sheetN.xml` - One part per table

mod cell_ref;
mod content_types;
mod doc_props;
mod error;
mod relationships;
mod shared_strings;
mod sheet_names;
mod styles;
mod workbook;
mod worksheet;
mod writer;
mod xml;

pub use cell_ref::{cell_ref, column_letters};
pub use error::{XlsxError, XlsxResult};
pub use shared_strings::SharedStrings;
pub use sheet_names::{sanitize_sheet_name, unique_sheet_names, MAX_SHEET_NAME_LEN};
pub use styles::CellStyle;
pub use worksheet::{SheetColumn, SheetContent};
pub use writer::XlsxWorkbook;

/// XML namespaces used in XLSX parts
pub mod namespaces {
    /// Main SpreadsheetML namespace
    pub const MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
}

/// Relationship types used in XLSX packages
pub mod relationship_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
}

/// Content types of XLSX parts
pub mod content_type_values {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// Rows per worksheet, header included
pub const MAX_ROWS: usize = 1_048_576;
/// Columns per worksheet
pub const MAX_COLUMNS: usize = 16_384;

#[cfg(test)]
mod tests;
