//! Page geometry for a captured bitmap

use crate::pdf::{MediaBox, PagePlacement, PageSize};
use serde::{Deserialize, Serialize};

/// Points per CSS pixel
pub const PX_TO_PT: f64 = 72.0 / 96.0;

/// How the PDF page is sized around the bitmap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PageSizing {
    /// The page takes the bitmap's pixel dimensions; the image fills it
    #[default]
    FromBitmap,
    /// A standard page; the image spans its width and hangs from the top
    FitWidth { page: PageSize },
}

impl PageSizing {
    /// Place a `width` x `height` pixel bitmap on its page
    pub fn place(&self, width: u32, height: u32) -> PagePlacement {
        match self {
            PageSizing::FromBitmap => PagePlacement::full_page(MediaBox::from_dimensions(
                width as f64 * PX_TO_PT,
                height as f64 * PX_TO_PT,
            )),
            PageSizing::FitWidth { page } => {
                let media_box = page.media_box();
                let scaled_height = if width == 0 {
                    0.0
                } else {
                    media_box.width() * height as f64 / width as f64
                };
                PagePlacement {
                    media_box,
                    x: 0.0,
                    y: media_box.height() - scaled_height,
                    width: media_box.width(),
                    height: scaled_height,
                }
            }
        }
    }
}
