//! Profile photo decoding
//!
//! The editor stores the photo as a `data:<mime>;base64,<payload>` URI. The
//! payload is decoded, sniffed and fully decoded once to prove it is a real
//! image before it is embedded. PNG, JPEG and GIF bytes are embedded as-is;
//! other decodable formats are re-encoded to PNG.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use doc_model::{Alignment, ImageBlock, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

/// Why a photo could not be embedded
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo is empty")]
    Empty,

    #[error("photo data URI is not base64-encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unreadable image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a photo source into a centered, square image block of
/// `size_px` CSS pixels.
pub fn decode_photo(source: &str, size_px: u32) -> Result<ImageBlock, PhotoError> {
    let payload = base64_payload(source)?;
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(PhotoError::Empty);
    }
    let bytes = STANDARD.decode(compact.as_bytes())?;

    let sniffed = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, sniffed)?;
    let (width, height) = (decoded.width(), decoded.height());

    let (data, format) = match sniffed {
        image::ImageFormat::Png => (bytes, ImageFormat::Png),
        image::ImageFormat::Jpeg => (bytes, ImageFormat::Jpeg),
        image::ImageFormat::Gif => (bytes, ImageFormat::Gif),
        other => {
            tracing::debug!(format = ?other, "re-encoding photo as png");
            let mut buf = Cursor::new(Vec::new());
            decoded.write_to(&mut buf, image::ImageFormat::Png)?;
            (buf.into_inner(), ImageFormat::Png)
        }
    };

    Ok(ImageBlock::new("photo", data, format, width, height)
        .with_display_size(size_px, size_px)
        .aligned(Alignment::Center))
}

/// Strip a `data:` URI header, or pass bare base64 through
fn base64_payload(source: &str) -> Result<&str, PhotoError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(PhotoError::Empty);
    }
    match source.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotBase64)?;
            if header.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
                Ok(payload)
            } else {
                Err(PhotoError::NotBase64)
            }
        }
        None => Ok(source),
    }
}
