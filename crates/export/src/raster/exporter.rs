//! Surface to PDF

use super::surface::{CaptureOptions, RenderSurface};
use super::{RasterOptions, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use crate::error::{ExportError, Result};
use crate::pdf::{write_image_pdf, PdfOptions};
use std::time::Duration;

/// Captures a render surface into a one-page PDF
#[derive(Debug, Clone, Default)]
pub struct RasterExporter {
    options: RasterOptions,
    pdf: PdfOptions,
}

impl RasterExporter {
    pub fn new(options: RasterOptions, pdf: PdfOptions) -> Self {
        Self { options, pdf }
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Snapshot options with the scale brought into range
    pub fn capture_options(&self) -> CaptureOptions {
        let requested = self.options.scale;
        let scale = if requested.is_finite() {
            requested.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            DEFAULT_SCALE
        };
        if scale != requested {
            tracing::warn!(requested, used = scale, "capture scale out of range");
        }

        CaptureOptions {
            scale,
            cross_origin: self.options.cross_origin,
        }
    }

    /// Snapshot `surface`, encode it and wrap it in a PDF page.
    ///
    /// The whole pipeline runs under the configured timeout. `title` goes
    /// into the document info.
    pub async fn capture<S: RenderSurface>(&self, surface: &S, title: Option<&str>) -> Result<Vec<u8>> {
        let budget = Duration::from_millis(self.options.timeout_ms);
        match tokio::time::timeout(budget, self.capture_unbounded(surface, title)).await {
            Ok(result) => result,
            Err(_) => Err(ExportError::Timeout(budget)),
        }
    }

    async fn capture_unbounded<S: RenderSurface>(&self, surface: &S, title: Option<&str>) -> Result<Vec<u8>> {
        if !surface.is_ready() {
            return Err(ExportError::MissingSurface);
        }

        let options = self.capture_options();
        let bitmap = surface.snapshot(&options).await?;

        let (width, height) = bitmap.dimensions();
        let placement = self.options.page_sizing.place(width, height);
        if placement.overflows() {
            tracing::warn!(
                image_height = placement.height,
                page_height = placement.media_box.height(),
                "captured resume is taller than the page, bottom will be clipped"
            );
        }

        let pdf_options = self.pdf.clone();
        let title = title.map(str::to_owned);
        let bytes = tokio::task::spawn_blocking(move || {
            write_image_pdf(&bitmap, &placement, &pdf_options, title.as_deref())
        })
        .await??;

        tracing::debug!(width, height, bytes = bytes.len(), "pdf encoded");
        Ok(bytes)
    }
}
