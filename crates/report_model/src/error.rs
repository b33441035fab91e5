//! Error types for report model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Unknown alignment: {0}")]
    UnknownAlignment(String),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
