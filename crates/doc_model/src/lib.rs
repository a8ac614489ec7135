//! Document Model - word-processing document tree
//!
//! A flat, ordered tree of blocks (paragraphs and image blocks) with
//! paragraph- and character-level properties. Trees are assembled from
//! immutable section blocks in a fixed order and then handed to a
//! serializer.

mod style;
mod run;
mod paragraph;
mod image;
mod tree;

pub use style::*;
pub use run::*;
pub use paragraph::*;
pub use image::*;
pub use tree::*;
