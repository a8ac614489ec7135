//! Text run - a contiguous span of text with consistent formatting

use crate::CharacterProperties;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The text content; `\n` marks a line break inside the run
    pub text: String,
    pub properties: CharacterProperties,
}

impl Run {
    /// Create a run with inherited formatting
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: CharacterProperties::default(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.properties.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.properties.italic = Some(true);
        self
    }

    /// Set the font size in points
    pub fn size(mut self, points: f32) -> Self {
        self.properties.font_size = Some(points);
        self
    }

}
