//! Download file naming

use crate::ExportFormat;
use serde::{Deserialize, Serialize};

/// How downloaded files are named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilenamePolicy {
    /// `Amelia_Chen_Resume.pdf`; falls back to [`FilenamePolicy::Generic`]
    /// when the name is blank
    #[default]
    Personalized,
    /// `resume.pdf`
    Generic,
}

impl FilenamePolicy {
    /// Derive the download file name for `name` in `format`
    pub fn file_name(&self, name: &str, format: ExportFormat) -> String {
        let stem = match self {
            FilenamePolicy::Personalized => personal_stem(name),
            FilenamePolicy::Generic => None,
        };
        match stem {
            Some(stem) => format!("{}_Resume.{}", stem, format.extension()),
            None => format!("resume.{}", format.extension()),
        }
    }
}

/// Whitespace runs become `_`; path separators are not allowed through.
fn personal_stem(name: &str) -> Option<String> {
    let stem = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}
