//! PDF Writer
//!
//! This module handles the actual PDF file generation, including:
//! - Object numbering and cross-reference table
//! - File structure (header, body, xref, trailer)
//! - Flate compression of streams

use super::content::ContentStream;
use super::document::{create_catalog, create_pages, DocumentInfo, PagePlacement, PdfPage};
use super::images::encode_bitmap;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::PdfOptions;
use image::RgbaImage;
use std::io::{self, Write};
use thiserror::Error;

/// 1.4 is the first version with soft masks
const PDF_VERSION: &str = "1.4";

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// An object in the PDF file with its byte offset
#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    /// Generation number (always 0 for new objects)
    gen_num: u16,
    /// Byte offset in the file
    offset: u64,
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    objects: Vec<ObjectEntry>,
    next_obj_num: u32,
    /// Whether to compress streams
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    /// Set whether to compress streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: PdfObject) -> Result<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry {
            obj_num,
            gen_num: 0,
            offset,
        });

        Ok(())
    }

    /// Write a stream object with optional compression
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }

        stream.dict.insert("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_object(obj_num, PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries: Vec<_> = self.objects.iter().map(|e| (e.obj_num, e.offset, e.gen_num)).collect();
        let next_obj_num = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for (obj_num, offset, gen_num) in entries {
            // Allocated but never written
            while expected_num < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }

            self.write_str(&format!("{:010} {:05} n \n", offset, gen_num))?;
            expected_num = obj_num + 1;
        }

        self.write_str("trailer\n")?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(next_obj_num as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref, 0));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info, 0));
        }

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Compress a stream using flate compression
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder.finish().map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::Name("FlateDecode".to_string()));

    Ok(stream)
}

/// Writes a one-page PDF whose only content is a captured bitmap
pub struct ImagePageWriter {
    options: PdfOptions,
}

impl ImagePageWriter {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    /// Build the complete file in memory.
    ///
    /// `title` is used for the Info dictionary unless the options carry one.
    pub fn write(&self, bitmap: &RgbaImage, placement: &PagePlacement, title: Option<&str>) -> Result<Vec<u8>> {
        let (width, height) = bitmap.dimensions();
        if width == 0 || height == 0 {
            return Err(PdfError::InvalidDocument("empty bitmap".to_string()));
        }

        let (color, mask) = encode_bitmap(bitmap);

        let mut pdf = PdfWriter::new(Vec::new());
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();
        let page_ref = pdf.allocate_object();
        let content_ref = pdf.allocate_object();
        let image_ref = pdf.allocate_object();
        let mask_ref = mask.as_ref().map(|_| pdf.allocate_object());

        pdf.write_object(catalog_ref, create_catalog(pages_ref).into())?;
        pdf.write_object(pages_ref, create_pages(&[page_ref]).into())?;

        let mut info = DocumentInfo::new();
        if let Some(title) = self.options.title.as_deref().or(title) {
            info = info.with_title(title);
        }
        pdf.write_object(info_ref, info.to_dictionary().into())?;

        let mut page = PdfPage::new(placement.media_box).with_content(content_ref);
        page.add_image("Im0", image_ref);
        pdf.write_object(page_ref, page.to_dictionary(pages_ref).into())?;

        let mut content = ContentStream::new();
        content.draw_image("Im0", placement.x, placement.y, placement.width, placement.height);
        pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

        let color = match mask_ref {
            Some(mask_ref) => color.with_soft_mask(mask_ref),
            None => color,
        };
        pdf.write_stream_object(image_ref, color.to_xobject())?;

        if let (Some(mask), Some(mask_ref)) = (mask, mask_ref) {
            pdf.write_stream_object(mask_ref, mask.to_xobject())?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()
    }
}
