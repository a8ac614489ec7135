//! Styles.xml writer
//!
//! Emits document defaults and the small fixed set of paragraph styles the
//! resume layout references.

use super::{escape_xml, namespaces};
use doc_model::{CharacterProperties, StyleId};

/// A built-in paragraph style definition
struct StyleDef {
    id: &'static str,
    name: &'static str,
    based_on: Option<&'static str>,
    /// Space after, in points
    space_after: Option<f32>,
    run: CharacterProperties,
}

fn builtin_styles() -> Vec<StyleDef> {
    vec![
        StyleDef {
            id: StyleId::NORMAL,
            name: "Normal",
            based_on: None,
            space_after: None,
            run: CharacterProperties::default(),
        },
        StyleDef {
            id: StyleId::TITLE,
            name: "Title",
            based_on: Some(StyleId::NORMAL),
            space_after: Some(4.0),
            run: CharacterProperties {
                font_size: Some(28.0),
                ..Default::default()
            },
        },
        StyleDef {
            id: StyleId::HEADING_1,
            name: "heading 1",
            based_on: Some(StyleId::NORMAL),
            space_after: Some(6.0),
            run: CharacterProperties {
                font_size: Some(14.0),
                bold: Some(true),
                color: Some("2E74B5".to_string()),
                ..Default::default()
            },
        },
        StyleDef {
            id: StyleId::LIST_PARAGRAPH,
            name: "List Paragraph",
            based_on: Some(StyleId::NORMAL),
            space_after: Some(0.0),
            run: CharacterProperties::default(),
        },
    ]
}

/// Writer for styles.xml
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        self.write_doc_defaults(&mut xml);
        for style in builtin_styles() {
            self.write_style(&mut xml, &style);
        }

        xml.push_str("</w:styles>");
        xml
    }

    /// Write document defaults
    fn write_doc_defaults(&self, xml: &mut String) {
        xml.push_str("<w:docDefaults>");

        xml.push_str("<w:rPrDefault>");
        xml.push_str("<w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
        xml.push_str(r#"<w:sz w:val="22"/>"#);
        xml.push_str(r#"<w:szCs w:val="22"/>"#);
        xml.push_str("</w:rPr>");
        xml.push_str("</w:rPrDefault>");

        xml.push_str("<w:pPrDefault>");
        xml.push_str("<w:pPr>");
        xml.push_str(r#"<w:spacing w:after="120" w:line="259" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr>");
        xml.push_str("</w:pPrDefault>");

        xml.push_str("</w:docDefaults>");
    }

    /// Write a single style definition
    fn write_style(&self, xml: &mut String, style: &StyleDef) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}""#,
            escape_xml(style.id)
        ));
        if style.id == StyleId::NORMAL {
            xml.push_str(r#" w:default="1""#);
        }
        xml.push('>');

        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape_xml(style.name)));
        if let Some(based_on) = style.based_on {
            xml.push_str(&format!(r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on)));
        }
        xml.push_str("<w:qFormat/>");

        if let Some(after) = style.space_after {
            xml.push_str(&format!(
                r#"<w:pPr><w:spacing w:after="{}"/></w:pPr>"#,
                (after * 20.0) as i32
            ));
        }

        if !style.run.is_empty() {
            xml.push_str("<w:rPr>");
            if style.run.bold == Some(true) {
                xml.push_str("<w:b/>");
            }
            if let Some(ref color) = style.run.color {
                xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
            }
            if let Some(size) = style.run.font_size {
                let half_points = (size * 2.0).round() as i32;
                xml.push_str(&format!(r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, half_points, half_points));
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str("</w:style>");
    }
}

impl Default for StylesWriter {
    fn default() -> Self {
        Self::new()
    }
}
