//! Single-page raster PDF output
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: Catalog, page tree, page, Info dictionary, page sizes
//! - `content`: Content stream generation (graphics state, XObject painting)
//! - `images`: Bitmap to image XObject with optional soft mask
//! - `writer`: File structure, compression and the one-page image writer

mod content;
mod document;
mod images;
mod objects;
mod writer;

pub use content::ContentStream;
pub use document::{pdf_date, DocumentInfo, MediaBox, PagePlacement, PageSize, PdfPage};
pub use images::{encode_bitmap, ColorSpace, ImageData};
pub use objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream, PdfString};
pub use writer::{ImagePageWriter, PdfError, PdfWriter};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// PDF output options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PdfOptions {
    /// Flate-compress content and image streams
    pub compress: bool,
    /// Info dictionary title; the resume name is used when unset
    pub title: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: true,
            title: None,
        }
    }
}

/// Encode `bitmap` as a one-page PDF
pub fn write_image_pdf(
    bitmap: &RgbaImage,
    placement: &PagePlacement,
    options: &PdfOptions,
    title: Option<&str>,
) -> Result<Vec<u8>, PdfError> {
    ImagePageWriter::new(options.clone()).write(bitmap, placement, title)
}

#[cfg(test)]
mod tests;
