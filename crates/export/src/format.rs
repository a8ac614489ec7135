//! Export format identifiers and rendered payloads

use crate::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three download formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Txt];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Txt => "text/plain;charset=utf-8",
        }
    }

    /// Upper-case name used in user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Txt => "TXT",
        }
    }

    /// Whether this format needs a live preview surface
    pub fn requires_surface(&self) -> bool {
        matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Accepts `pdf`, `.docx`, `TXT` and similar tokens
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().trim_start_matches('.');
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(token))
            .ok_or_else(|| ExportError::UnsupportedFormat(s.trim().to_string()))
    }
}

/// Rendered bytes tagged with their format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub format: ExportFormat,
    pub data: Vec<u8>,
}

impl Payload {
    pub fn new(format: ExportFormat, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!(" DOCX ".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!(".txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
    }

    #[test]
    fn test_unknown_token_is_unsupported() {
        let err = "rtf".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref t) if t == "rtf"));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(ExportFormat::Docx.extension(), "docx");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(ExportFormat::Txt.display_name(), "TXT");
        assert!(ExportFormat::Pdf.requires_surface());
        assert!(!ExportFormat::Docx.requires_surface());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ExportFormat::Docx).unwrap(), "\"docx\"");
        let parsed: ExportFormat = serde_json::from_str("\"txt\"").unwrap();
        assert_eq!(parsed, ExportFormat::Txt);
    }
}
