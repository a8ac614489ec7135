//! Paragraph - a block of content containing runs

use crate::{Alignment, BorderLine, ParagraphProperties, Run, StyleId};
use serde::{Deserialize, Serialize};

/// A paragraph containing text runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Paragraph style reference; `None` falls back to `Normal`
    pub style_id: Option<StyleId>,
    pub properties: ParagraphProperties,
}

impl Paragraph {
    /// Create an empty paragraph
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            style_id: None,
            properties: ParagraphProperties::default(),
        }
    }

    /// A paragraph holding one unformatted run
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_run(Run::new(text))
    }

    /// Section heading: `Heading1` style with a rule beneath it
    pub fn heading(text: impl Into<String>) -> Self {
        let mut para = Self::text(text).with_style(StyleId::HEADING_1);
        para.properties.border_bottom = Some(BorderLine::rule());
        para
    }

    /// A bulleted list item at `level`
    pub fn bullet(text: impl Into<String>, level: u8) -> Self {
        let mut para = Self::text(text).with_style(StyleId::LIST_PARAGRAPH);
        para.properties.bullet_level = Some(level);
        para
    }

    /// An empty paragraph used as vertical spacing
    pub fn spacer() -> Self {
        Self::new()
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_style(mut self, style_id: impl Into<StyleId>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.properties.alignment = Some(alignment);
        self
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_bullet(&self) -> bool {
        self.properties.bullet_level.is_some()
    }

    pub fn is_heading(&self) -> bool {
        self.style_id.as_ref().is_some_and(|s| s.as_str() == StyleId::HEADING_1)
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}
