//! PDF Image Handling
//!
//! Captured bitmaps are embedded losslessly: the color samples become an RGB
//! image XObject and, when any pixel is not fully opaque, the alpha channel
//! becomes a DeviceGray soft mask. Compression is applied by the writer.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use image::RgbaImage;

/// Color space for images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component)
    DeviceGray,
    /// RGB (3 components)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the PDF name for this color space
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }

    /// Get the number of components
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }
}

/// Image data for embedding in PDF
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per component (always 8 here)
    pub bits_per_component: u8,
    pub color_space: ColorSpace,
    /// Raw samples, row-major, top row first
    pub data: Vec<u8>,
    /// Optional soft mask (alpha channel) object reference
    pub soft_mask_ref: Option<u32>,
}

impl ImageData {
    /// Create image data from raw RGB bytes
    pub fn from_raw_rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceRGB,
            data,
            soft_mask_ref: None,
        }
    }

    /// Create image data from raw grayscale bytes
    pub fn from_raw_gray(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceGray,
            data,
            soft_mask_ref: None,
        }
    }

    /// Set the soft mask reference
    pub fn with_soft_mask(mut self, mask_ref: u32) -> Self {
        self.soft_mask_ref = Some(mask_ref);
        self
    }

    /// Expected sample count for the declared size
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.color_space.components() as usize
    }

    /// Convert to PDF XObject stream
    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::new().with_type("XObject");

        dict.insert("Subtype", PdfObject::Name("Image".to_string()));
        dict.insert("Width", PdfObject::Integer(self.width as i64));
        dict.insert("Height", PdfObject::Integer(self.height as i64));
        dict.insert("BitsPerComponent", PdfObject::Integer(self.bits_per_component as i64));
        dict.insert("ColorSpace", PdfObject::Name(self.color_space.pdf_name().to_string()));

        if let Some(mask_ref) = self.soft_mask_ref {
            dict.insert("SMask", PdfObject::Reference(mask_ref, 0));
        }

        PdfStream {
            dict,
            data: self.data.clone(),
            compressed: false,
        }
    }
}

/// Split a bitmap into RGB samples and, if it has any transparency, an
/// alpha soft mask.
pub fn encode_bitmap(bitmap: &RgbaImage) -> (ImageData, Option<ImageData>) {
    let (width, height) = bitmap.dimensions();
    let pixel_count = width as usize * height as usize;

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut translucent = false;

    for pixel in bitmap.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
        translucent |= a != u8::MAX;
    }

    let color = ImageData::from_raw_rgb(rgb, width, height);
    let mask = translucent.then(|| ImageData::from_raw_gray(alpha, width, height));
    (color, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_bitmap_has_no_mask() {
        let bitmap = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let (color, mask) = encode_bitmap(&bitmap);

        assert!(mask.is_none());
        assert_eq!(color.data.len(), color.expected_len());
        assert_eq!(&color.data[..6], &[10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_transparency_produces_mask() {
        let mut bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        bitmap.put_pixel(1, 0, Rgba([0, 0, 0, 128]));
        let (_, mask) = encode_bitmap(&bitmap);

        let mask = mask.unwrap();
        assert_eq!(mask.color_space, ColorSpace::DeviceGray);
        assert_eq!(mask.data, vec![255, 128, 255, 255]);
    }

    #[test]
    fn test_xobject_dictionary() {
        let color = ImageData::from_raw_rgb(vec![0; 12], 2, 2).with_soft_mask(7);
        let stream = color.to_xobject();

        assert_eq!(stream.dict.get("Subtype"), Some(&PdfObject::name("Image")));
        assert_eq!(stream.dict.get("ColorSpace"), Some(&PdfObject::name("DeviceRGB")));
        assert_eq!(stream.dict.get("SMask"), Some(&PdfObject::reference(7)));
        assert!(!stream.compressed);
    }
}
