//! Style references and formatting properties

use serde::{Deserialize, Serialize};

/// Reference to a named paragraph or character style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleId(pub String);

impl StyleId {
    pub const NORMAL: &'static str = "Normal";
    pub const TITLE: &'static str = "Title";
    pub const HEADING_1: &'static str = "Heading1";
    pub const LIST_PARAGRAPH: &'static str = "ListParagraph";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Character-level formatting. `None` means "inherit from the style".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterProperties {
    /// Font size in points
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Hex color without the leading `#`
    pub color: Option<String>,
}

impl CharacterProperties {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.bold.is_none() && self.italic.is_none() && self.color.is_none()
    }
}

/// Single-line paragraph border in the automatic color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderLine {
    /// Width in eighths of a point
    pub size: u32,
    /// Gap between text and border in points
    pub space: u32,
}

impl BorderLine {
    /// Thin rule used under section headings
    pub fn rule() -> Self {
        Self { size: 6, space: 1 }
    }
}

/// Paragraph-level formatting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    pub alignment: Option<Alignment>,
    /// Bullet list level; `None` for ordinary paragraphs
    pub bullet_level: Option<u8>,
    pub border_bottom: Option<BorderLine>,
}

impl ParagraphProperties {
    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.bullet_level.is_none() && self.border_bottom.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_properties() {
        assert!(CharacterProperties::default().is_empty());
        assert!(!CharacterProperties {
            bold: Some(true),
            ..Default::default()
        }
        .is_empty());
        assert!(ParagraphProperties::default().is_empty());
        let props = ParagraphProperties {
            border_bottom: Some(BorderLine::rule()),
            ..Default::default()
        };
        assert!(!props.is_empty());
    }
}
