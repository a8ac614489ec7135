//! Error types for resume model operations

use crate::EntryKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{kind} entry {index} does not exist (have {len})")]
    IndexOutOfRange {
        kind: EntryKind,
        index: usize,
        len: usize,
    },

    #[error("Invalid resume data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
