//! Error types for DOCX packing

use thiserror::Error;

/// Errors that can occur while packing a DOCX archive
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing into the archive buffer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid DOCX structure
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),

    /// The blocking packer task panicked or was cancelled
    #[error("Packing task failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for DocxError {
    fn from(err: tokio::task::JoinError) -> Self {
        DocxError::Worker(err.to_string())
    }
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
