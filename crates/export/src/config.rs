//! Export configuration
//!
//! All renderer options in one serializable struct, stored as camelCase
//! JSON. A missing file means defaults; so does a file that fails to parse,
//! after a warning.

use crate::docx::DocxOptions;
use crate::naming::FilenamePolicy;
use crate::pdf::PdfOptions;
use crate::raster::{CrossOriginPolicy, PageSizing, RasterOptions};
use crate::text::{ResponsibilityStyle, TextOptions};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Options for every export format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub naming: FilenamePolicy,
    pub text: TextOptions,
    pub docx: DocxOptions,
    pub raster: RasterOptions,
    pub pdf: PdfOptions,
}

impl ExportConfig {
    /// Load configuration from disk, or return defaults if the file doesn't exist
    pub async fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse_or_default(&content, path))
    }

    /// Load configuration synchronously (for use during startup)
    pub fn load_sync(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_or_default(&content, path))
    }

    /// Save configuration, creating parent directories as needed
    pub async fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await
    }

    fn parse_or_default(content: &str, path: &Path) -> Self {
        match serde_json::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to parse export config, using defaults: {}",
                    e
                );
                Self::default()
            }
        }
    }

    pub fn with_naming(mut self, naming: FilenamePolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_responsibility_style(mut self, style: ResponsibilityStyle) -> Self {
        self.text.responsibility_style = style;
        self
    }

    pub fn with_photo_size(mut self, px: u32) -> Self {
        self.docx.photo_size_px = px;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.raster.scale = scale;
        self
    }

    pub fn with_page_sizing(mut self, sizing: PageSizing) -> Self {
        self.raster.page_sizing = sizing;
        self
    }

    pub fn with_cross_origin(mut self, policy: CrossOriginPolicy) -> Self {
        self.raster.cross_origin = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.raster.timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn with_pdf_title(mut self, title: impl Into<String>) -> Self {
        self.pdf.title = Some(title.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.pdf.compress = compress;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.raster.timeout_ms)
    }
}
