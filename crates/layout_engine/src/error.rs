//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),

    #[error("Table has no columns to lay out")]
    NoColumns,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
