//! Document tree and section blocks
//!
//! Renderers build a sequence of immutable [`SectionBlock`]s in a fixed
//! order and flatten them into a [`DocumentTree`]. The order of sections in
//! the output is therefore the order of the pipeline that produced them,
//! never the result of conditional appends scattered across code paths.

use crate::{ImageBlock, Paragraph};
use serde::{Deserialize, Serialize};

/// A body-level element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Image(ImageBlock),
}

impl From<Paragraph> for Block {
    fn from(para: Paragraph) -> Self {
        Block::Paragraph(para)
    }
}

impl From<ImageBlock> for Block {
    fn from(image: ImageBlock) -> Self {
        Block::Image(image)
    }
}

/// A finished, optionally headed, group of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBlock {
    /// Heading text; rendered as a ruled `Heading1` paragraph
    pub heading: Option<String>,
    pub blocks: Vec<Block>,
}

impl SectionBlock {
    /// A headed section
    pub fn titled(heading: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            heading: Some(heading.into()),
            blocks,
        }
    }

    /// Blocks with no heading (document header, photo)
    pub fn untitled(blocks: Vec<Block>) -> Self {
        Self { heading: None, blocks }
    }

    fn into_blocks(self) -> impl Iterator<Item = Block> {
        self.heading
            .map(|h| Block::Paragraph(Paragraph::heading(h)))
            .into_iter()
            .chain(self.blocks)
    }
}

/// The complete document body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten sections, in the given order, into a tree
    pub fn from_sections(sections: impl IntoIterator<Item = SectionBlock>) -> Self {
        Self {
            blocks: sections.into_iter().flat_map(SectionBlock::into_blocks).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageBlock> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Image(i) => Some(i),
            Block::Paragraph(_) => None,
        })
    }

    /// Whether any paragraph needs a bullet numbering definition
    pub fn has_bullets(&self) -> bool {
        self.paragraphs().any(Paragraph::is_bullet)
    }

    /// Heading texts in document order
    pub fn headings(&self) -> Vec<String> {
        self.paragraphs()
            .filter(|p| p.is_heading())
            .map(Paragraph::plain_text)
            .collect()
    }
}
