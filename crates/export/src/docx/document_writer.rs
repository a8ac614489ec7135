//! Document.xml writer
//!
//! Converts the DocumentTree to DOCX document.xml format.

use super::escape_xml;
use super::media_writer::{generate_inline_drawing, pixels_to_emu};
use super::namespaces;
use super::numbering_writer::BULLET_NUM_ID;
use doc_model::{
    Alignment, Block, BorderLine, CharacterProperties, DocumentTree, ImageBlock,
    Paragraph, ParagraphProperties, Run,
};

/// Writer for document.xml
pub struct DocumentWriter<'a> {
    /// Relationship IDs of the tree's images, in document order
    image_rels: &'a [String],
    next_image: usize,
}

impl<'a> DocumentWriter<'a> {
    /// Create a document writer; `image_rels[i]` is the relationship of the
    /// i-th image block
    pub fn new(image_rels: &'a [String]) -> Self {
        Self {
            image_rels,
            next_image: 0,
        }
    }

    /// Generate document.xml content
    pub fn write(&mut self, tree: &DocumentTree) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::A,
        ));
        xml.push_str("<w:body>");

        for block in &tree.blocks {
            match block {
                Block::Paragraph(para) => self.write_paragraph(&mut xml, para),
                Block::Image(image) => self.write_image(&mut xml, image),
            }
        }

        // US Letter, one-inch margins
        xml.push_str(concat!(
            "<w:sectPr>",
            r#"<w:pgSz w:w="12240" w:h="15840"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
            "</w:sectPr>",
        ));
        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        xml
    }

    /// Write a paragraph element
    fn write_paragraph(&self, xml: &mut String, para: &Paragraph) {
        xml.push_str("<w:p>");
        write_paragraph_properties(xml, para.style_id.as_ref().map(|s| s.as_str()), &para.properties);
        for run in &para.runs {
            write_run(xml, run);
        }
        xml.push_str("</w:p>");
    }

    /// Write an image block as a paragraph holding one inline drawing
    fn write_image(&mut self, xml: &mut String, image: &ImageBlock) {
        let index = self.next_image;
        self.next_image += 1;

        let Some(rel_id) = self.image_rels.get(index) else {
            tracing::warn!(image = %image.name, "no relationship registered for image, skipping");
            return;
        };

        let props = ParagraphProperties {
            alignment: Some(image.alignment),
            ..Default::default()
        };

        xml.push_str("<w:p>");
        write_paragraph_properties(xml, None, &props);
        xml.push_str("<w:r>");
        xml.push_str(&generate_inline_drawing(
            rel_id,
            index + 1,
            pixels_to_emu(image.display_width),
            pixels_to_emu(image.display_height),
            &image.name,
        ));
        xml.push_str("</w:r>");
        xml.push_str("</w:p>");
    }
}

/// Write paragraph properties in schema order
fn write_paragraph_properties(xml: &mut String, style_id: Option<&str>, props: &ParagraphProperties) {
    if style_id.is_none() && props.is_empty() {
        return;
    }

    xml.push_str("<w:pPr>");

    if let Some(style) = style_id {
        xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style)));
    }

    if let Some(level) = props.bullet_level {
        xml.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, BULLET_NUM_ID
        ));
    }

    if let Some(ref border) = props.border_bottom {
        xml.push_str("<w:pBdr>");
        write_border(xml, "bottom", border);
        xml.push_str("</w:pBdr>");
    }

    if let Some(alignment) = props.alignment {
        let val = match alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
        };
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, val));
    }

    xml.push_str("</w:pPr>");
}

fn write_border(xml: &mut String, side: &str, border: &BorderLine) {
    xml.push_str(&format!(
        r#"<w:{} w:val="single" w:sz="{}" w:space="{}" w:color="auto"/>"#,
        side, border.size, border.space
    ));
}

/// Write a run element.
///
/// Line feeds, carriage returns, vertical tabs and form feeds all become
/// `<w:br/>`; a CRLF pair is one break.
fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    write_run_properties(xml, &run.properties);

    let text = run.text.replace("\r\n", "\n");
    for (i, line) in text.split(is_line_break).enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        if line.is_empty() {
            continue;
        }
        if line.starts_with(' ') || line.ends_with(' ') {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            xml.push_str("<w:t>");
        }
        xml.push_str(&escape_xml(line));
        xml.push_str("</w:t>");
    }

    xml.push_str("</w:r>");
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0B}' | '\u{0C}')
}

/// Write run properties
fn write_run_properties(xml: &mut String, props: &CharacterProperties) {
    if props.is_empty() {
        return;
    }

    xml.push_str("<w:rPr>");

    if props.bold == Some(true) {
        xml.push_str("<w:b/>");
    } else if props.bold == Some(false) {
        xml.push_str(r#"<w:b w:val="0"/>"#);
    }

    if props.italic == Some(true) {
        xml.push_str("<w:i/>");
    } else if props.italic == Some(false) {
        xml.push_str(r#"<w:i w:val="0"/>"#);
    }

    if let Some(ref color) = props.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
    }

    // Font size is stored in half-points
    if let Some(size) = props.font_size {
        let half_points = (size * 2.0).round() as i32;
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half_points));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, half_points));
    }

    xml.push_str("</w:rPr>");
}
