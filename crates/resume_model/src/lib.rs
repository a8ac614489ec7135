//! Resume Model - canonical resume snapshot and editing primitives
//!
//! This crate defines the `ResumeDocument` value that every exporter renders,
//! the typed field addressing used by editors to mutate it, and the
//! injectable text-enhancement capability.

mod document;
mod error;
mod field;
mod skills;
pub mod enhance;

pub use document::*;
pub use error::*;
pub use field::*;
pub use skills::*;
pub use enhance::{enhance_field, EnhanceError, EnhanceTracker, ServiceError, TextEnhancer};
