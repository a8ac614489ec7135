//! Image blocks
//!
//! An image block is a standalone, already-decoded-and-verified image placed
//! on its own line. Display size is expressed in CSS pixels (96 per inch);
//! serializers convert to their own unit system.

use crate::Alignment;
use serde::{Deserialize, Serialize};

/// Encoded image formats a word-processing package can carry as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// File extension used for the media part
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// An embedded picture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Name used for the media part and the drawing's description
    pub name: String,
    /// Encoded bytes in `format`
    pub data: Vec<u8>,
    pub format: ImageFormat,
    /// Intrinsic size in pixels
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// On-page size in CSS pixels
    pub display_width: u32,
    pub display_height: u32,
    pub alignment: Alignment,
}

impl ImageBlock {
    /// Create a block displayed at its intrinsic size
    pub fn new(name: impl Into<String>, data: Vec<u8>, format: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            data,
            format,
            pixel_width: width,
            pixel_height: height,
            display_width: width,
            display_height: height,
            alignment: Alignment::Left,
        }
    }

    /// Display at a fixed `width` x `height`
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        self.display_width = width.max(1);
        self.display_height = height.max(1);
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Media part file name, e.g. `photo.png`
    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .take(32)
            .collect();
        let stem = if stem.is_empty() { "image1".to_string() } else { stem };
        format!("{}.{}", stem, self.format.extension())
    }
}
