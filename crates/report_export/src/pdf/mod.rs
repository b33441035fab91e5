//! PDF Export Module
//!
//! Renders a table into a paginated PDF built by hand from indirect objects.
//!
//! # Architecture
//!
//! - `objects`: PDF object model and serializer
//! - `document`: Catalog, page tree, info dictionary, object numbering
//! - `content`: Content stream operators
//! - `fonts`: Standard fonts and WinAnsi text encoding
//! - `writer`: File structure, cross-reference table, trailer
//! - `renderer`: Table layout, pagination, and page drawing

mod content;
mod document;
mod fonts;
mod objects;
mod renderer;
mod writer;

pub use content::{color_components, ContentStream};
pub use document::{pdf_date, DocumentInfo, MediaBox, ObjectIds, PRODUCER};
pub use fonts::{encode_win_ansi, StandardFont};
pub use objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
pub use renderer::PdfReport;
pub use writer::{PdfError, PdfResult, PdfWriter, PDF_VERSION};
