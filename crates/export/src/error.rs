//! Error types for export operations

use crate::docx::DocxError;
use crate::pdf::PdfError;
use crate::raster::CaptureError;
use crate::ExportFormat;
use std::time::Duration;
use thiserror::Error;

/// Why a single export attempt produced no file
#[derive(Debug, Error)]
pub enum ExportError {
    /// PDF requested but no renderable preview surface exists
    #[error("the resume preview is not available")]
    MissingSurface,

    /// Snapshotting the preview surface failed
    #[error("capture failed: {0}")]
    CaptureFailure(#[from] CaptureError),

    /// Packing or encoding the output failed
    #[error("encoding failed: {0}")]
    EncodeFailure(String),

    /// The requested format token is not one of pdf, docx, txt
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Capture and encode did not finish within the configured budget
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The finished file could not be handed to the user
    #[error("delivery failed: {0}")]
    Delivery(#[from] std::io::Error),
}

impl From<DocxError> for ExportError {
    fn from(err: DocxError) -> Self {
        ExportError::EncodeFailure(err.to_string())
    }
}

impl From<PdfError> for ExportError {
    fn from(err: PdfError) -> Self {
        ExportError::EncodeFailure(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::EncodeFailure(format!("worker task failed: {}", err))
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// A failed export, carrying the format for the user-facing message.
///
/// `format` is `None` when the requested format token itself was not
/// recognized.
#[derive(Debug, Error)]
#[error(
    "Sorry, there was an error generating the {} file: {error}",
    .format.map_or("requested", |f| f.display_name())
)]
pub struct ExportFailure {
    pub format: Option<ExportFormat>,
    #[source]
    pub error: ExportError,
}

impl ExportFailure {
    pub fn new(format: ExportFormat, error: ExportError) -> Self {
        Self {
            format: Some(format),
            error,
        }
    }

    pub fn without_format(error: ExportError) -> Self {
        Self { format: None, error }
    }
}
