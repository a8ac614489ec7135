//! Export - renderers and coordination for resume downloads
//!
//! One `ResumeDocument` snapshot is rendered into three artifacts:
//!
//! - `text`: flat plain text (`.txt`)
//! - `docx`: a structured word-processing package (`.docx`)
//! - `raster` + `pdf`: a single-page PDF wrapping a high-density bitmap of
//!   the on-screen preview (`.pdf`)
//!
//! The [`ExportCoordinator`] validates preconditions, dispatches to the right
//! renderer, names the file and hands the bytes to a [`Delivery`] sink.

mod config;
mod coordinator;
mod delivery;
mod error;
mod format;
mod naming;
pub mod docx;
pub mod pdf;
pub mod raster;
pub mod text;

pub use config::*;
pub use coordinator::*;
pub use delivery::*;
pub use error::*;
pub use format::*;
pub use naming::*;

pub use docx::{DocumentModelBuilder, DocxError, DocxOptions};
pub use pdf::{PdfError, PdfOptions};
pub use raster::{
    BitmapSurface, CaptureError, CaptureOptions, CrossOriginPolicy, PageSize, PageSizing,
    RasterExporter, RasterOptions, RenderSurface,
};
pub use text::{ResponsibilityStyle, TextFormatter, TextOptions};
