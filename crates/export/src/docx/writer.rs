//! DOCX Writer Infrastructure
//!
//! Creates ZIP archives with correct DOCX structure.

use super::content_types::{create_default_content_types, ContentTypes};
use super::content_type_values;
use super::document_writer::DocumentWriter;
use super::error::DocxResult;
use super::media_writer::MediaWriter;
use super::numbering_writer::NumberingWriter;
use super::relationship_types;
use super::relationships::{create_document_rels, create_root_rels, Relationships};
use super::styles_writer::StylesWriter;
use doc_model::DocumentTree;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete DOCX file from a DocumentTree
    pub fn write(mut self, tree: &DocumentTree) -> DocxResult<W> {
        // Media first so the document can reference relationship IDs
        let media = MediaWriter::new().collect(tree, &mut self.doc_rels, &mut self.content_types)?;
        let image_rels: Vec<String> = media.iter().map(|m| m.rel_id.clone()).collect();

        if tree.has_bullets() {
            self.doc_rels.add(relationship_types::NUMBERING, "numbering.xml");
            self.content_types
                .add_override("/word/numbering.xml", content_type_values::NUMBERING);
        }

        let doc_xml = DocumentWriter::new(&image_rels).write(tree);
        self.write_file("word/document.xml", &doc_xml)?;

        let styles_xml = StylesWriter::new().write();
        self.write_file("word/styles.xml", &styles_xml)?;

        if tree.has_bullets() {
            let numbering_xml = NumberingWriter::new().write();
            self.write_file("word/numbering.xml", &numbering_xml)?;
        }

        self.write_file("word/settings.xml", &generate_settings_xml())?;

        for part in &media {
            self.write_binary(&part.path, &part.data)?;
        }

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // Write [Content_Types].xml last
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options = file_options(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write binary data to the ZIP archive
    pub fn write_binary(&mut self, path: &str, data: &[u8]) -> DocxResult<()> {
        // Images are already compressed
        let options = file_options(zip::CompressionMethod::Stored);
        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;
        Ok(())
    }
}

/// Entries carry a fixed timestamp so identical trees pack to identical bytes
fn file_options(method: zip::CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(DateTime::default())
}

/// Pack a tree into DOCX bytes
pub fn write_docx(tree: &DocumentTree) -> DocxResult<Vec<u8>> {
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(tree)?;
    let bytes = cursor.into_inner();
    tracing::debug!(bytes = bytes.len(), images = tree.images().count(), "packed docx");
    Ok(bytes)
}

/// Generate a minimal settings.xml
pub fn generate_settings_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:settings xmlns:w="{}">"#,
            r#"<w:defaultTabStop w:val="720"/>"#,
            "<w:compat>",
            r#"<w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>"#,
            "</w:compat>",
            "</w:settings>",
        ),
        super::namespaces::W
    )
}
