//! Numbering.xml writer
//!
//! The resume only needs unordered bullets, so a single abstract definition
//! with three bullet levels backs one numbering instance.

use super::{escape_xml, namespaces};

/// `w:numId` referenced by every bullet paragraph
pub const BULLET_NUM_ID: u32 = 1;

const ABSTRACT_NUM_ID: u32 = 0;

/// Bullet glyph per level
const BULLET_GLYPHS: [&str; 3] = ["\u{2022}", "\u{25E6}", "\u{25AA}"];

/// Writer for numbering.xml
pub struct NumberingWriter;

impl NumberingWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate numbering.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, namespaces::W));

        xml.push_str(&format!(r#"<w:abstractNum w:abstractNumId="{}">"#, ABSTRACT_NUM_ID));
        xml.push_str(r#"<w:multiLevelType w:val="hybridMultilevel"/>"#);
        for (level, glyph) in BULLET_GLYPHS.iter().enumerate() {
            self.write_level(&mut xml, level, glyph);
        }
        xml.push_str("</w:abstractNum>");

        xml.push_str(&format!(
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
            BULLET_NUM_ID, ABSTRACT_NUM_ID
        ));

        xml.push_str("</w:numbering>");
        xml
    }

    /// Write one bullet level; each level indents a further quarter inch
    fn write_level(&self, xml: &mut String, level: usize, glyph: &str) {
        let left = 720 + 360 * level;
        xml.push_str(&format!(r#"<w:lvl w:ilvl="{}">"#, level));
        xml.push_str(r#"<w:start w:val="1"/>"#);
        xml.push_str(r#"<w:numFmt w:val="bullet"/>"#);
        xml.push_str(&format!(r#"<w:lvlText w:val="{}"/>"#, escape_xml(glyph)));
        xml.push_str(r#"<w:lvlJc w:val="left"/>"#);
        xml.push_str(&format!(
            r#"<w:pPr><w:ind w:left="{}" w:hanging="360"/></w:pPr>"#,
            left
        ));
        xml.push_str("</w:lvl>");
    }
}

impl Default for NumberingWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_defines_bullet_instance() {
        let xml = NumberingWriter::new().write();
        assert!(xml.contains(r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#));
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert_eq!(xml.matches("<w:lvl ").count(), 3);
    }
}
