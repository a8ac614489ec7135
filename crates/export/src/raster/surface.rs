//! Render surfaces
//!
//! A surface is whatever can produce a pixel snapshot of the resume preview.
//! Hosts with a live renderer implement [`RenderSurface`] themselves;
//! [`BitmapSurface`] covers the common case of an already-rendered preview
//! image.

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while snapshotting a surface
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("surface is not ready to be captured")]
    NotReady,

    #[error("surface has no visible area")]
    EmptySurface,

    #[error("render error: {0}")]
    Render(String),

    #[error("capture worker failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for CaptureError {
    fn from(err: tokio::task::JoinError) -> Self {
        CaptureError::Worker(err.to_string())
    }
}

/// How images loaded from other origins are treated during capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossOriginPolicy {
    /// Draw them as if they were same-origin
    #[default]
    TreatAsSameOrigin,
    /// Leave their area blank
    Skip,
}

/// Parameters for one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Pixel density multiplier over the surface's natural size
    pub scale: f32,
    pub cross_origin: CrossOriginPolicy,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            cross_origin: CrossOriginPolicy::default(),
        }
    }
}

impl CaptureOptions {
    /// Output size for a surface of `natural` size
    pub fn scaled_size(&self, natural: (u32, u32)) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.scale).round() as u32).max(1);
        (scale(natural.0), scale(natural.1))
    }
}

/// Handle to the on-screen resume preview
pub trait RenderSurface: Send + Sync {
    /// Whether the surface exists and has been laid out
    fn is_ready(&self) -> bool;

    /// Size in CSS pixels at scale 1
    fn natural_size(&self) -> (u32, u32);

    /// Rasterize the surface at `options.scale` times its natural size
    fn snapshot(
        &self,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<RgbaImage, CaptureError>> + Send;
}

/// Rectangle in natural-size pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SurfaceRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Surface backed by a preview bitmap rendered at scale 1
#[derive(Debug, Clone)]
pub struct BitmapSurface {
    bitmap: Arc<RgbaImage>,
    external_images: Vec<SurfaceRegion>,
}

impl BitmapSurface {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self {
            bitmap: Arc::new(bitmap),
            external_images: Vec::new(),
        }
    }

    /// Decode a PNG screenshot of the preview
    pub fn from_png(bytes: &[u8]) -> Result<Self, CaptureError> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| CaptureError::Render(e.to_string()))?;
        Ok(Self::new(image.to_rgba8()))
    }

    /// Mark an area as drawn from a cross-origin image
    pub fn with_external_image(mut self, region: SurfaceRegion) -> Self {
        self.external_images.push(region);
        self
    }
}

impl RenderSurface for BitmapSurface {
    fn is_ready(&self) -> bool {
        self.bitmap.width() > 0 && self.bitmap.height() > 0
    }

    fn natural_size(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    async fn snapshot(&self, options: &CaptureOptions) -> Result<RgbaImage, CaptureError> {
        if !self.is_ready() {
            return Err(CaptureError::EmptySurface);
        }

        let bitmap = Arc::clone(&self.bitmap);
        let blank = match options.cross_origin {
            CrossOriginPolicy::Skip => self.external_images.clone(),
            CrossOriginPolicy::TreatAsSameOrigin => Vec::new(),
        };
        let skipped = blank.len();
        let (width, height) = options.scaled_size(bitmap.dimensions());

        let snapshot = tokio::task::spawn_blocking(move || {
            let mut source = (*bitmap).clone();
            for region in &blank {
                blank_region(&mut source, region);
            }
            if (width, height) == source.dimensions() {
                source
            } else {
                imageops::resize(&source, width, height, FilterType::CatmullRom)
            }
        })
        .await?;

        tracing::debug!(width, height, skipped, "surface captured");
        Ok(snapshot)
    }
}

fn blank_region(image: &mut RgbaImage, region: &SurfaceRegion) {
    let x_end = region.x.saturating_add(region.width).min(image.width());
    let y_end = region.y.saturating_add(region.height).min(image.height());
    for y in region.y..y_end {
        for x in region.x..x_end {
            image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
}
