//! Layout Engine - Page setup, font metrics, and table pagination
//!
//! This crate computes the fixed geometry of a paginated table: page
//! dimensions after margins, column widths and offsets, row heights, and how
//! many data rows fit on each page. The result is computed once per document
//! and applied uniformly to every page.

mod error;
mod metrics;
mod page;
mod paginator;
mod table_layout;

pub use error::*;
pub use metrics::*;
pub use page::*;
pub use paginator::*;
pub use table_layout::*;
