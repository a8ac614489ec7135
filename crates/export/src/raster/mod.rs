//! Raster capture of the resume preview
//!
//! The preview surface is snapshotted at a higher pixel density, encoded
//! losslessly and wrapped in a single PDF page.

mod exporter;
mod geometry;
mod surface;

pub use crate::pdf::PageSize;
pub use exporter::RasterExporter;
pub use geometry::{PageSizing, PX_TO_PT};
pub use surface::{BitmapSurface, CaptureError, CaptureOptions, CrossOriginPolicy, RenderSurface, SurfaceRegion};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: f32 = 2.0;
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 4.0;

/// Capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterOptions {
    /// Pixel density multiplier, clamped to 1..=4
    pub scale: f32,
    pub page_sizing: PageSizing,
    pub cross_origin: CrossOriginPolicy,
    /// Budget for capture plus encode
    pub timeout_ms: u64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            page_sizing: PageSizing::default(),
            cross_origin: CrossOriginPolicy::default(),
            timeout_ms: 30_000,
        }
    }
}
