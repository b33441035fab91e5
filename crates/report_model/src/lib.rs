//! Report Model - Columns, tables, cell values, and value formatting
//!
//! This crate provides the data model shared by every export format:
//! typed column definitions, table/sheet grouping, record access for
//! field-name accessors, and the value formatter that turns raw cell
//! values into [`FormattedCell`]s consumed by the document builders.

mod column;
mod error;
pub mod format;
mod record;
mod table;
mod value;

pub use column::*;
pub use error::*;
pub use format::{format_cell, format_value, CellKind, FormattedCell, OutputTarget};
pub use record::*;
pub use table::*;
pub use value::*;
