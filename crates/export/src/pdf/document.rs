//! PDF Document Structure
//!
//! Catalog, page tree, page objects with their resources, and the Info
//! dictionary.

use super::objects::{PdfDictionary, PdfObject, PdfString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// PDF document information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Info stamped with the producer and the current time
    pub fn new() -> Self {
        Self {
            creator: Some("Resume Builder".to_string()),
            producer: Some(format!("resume export {}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() { None } else { Some(title) };
        self
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::String(PdfString::text(title)));
        }
        if let Some(ref creator) = self.creator {
            dict.insert("Creator", PdfObject::String(PdfString::text(creator)));
        }
        if let Some(ref producer) = self.producer {
            dict.insert("Producer", PdfObject::String(PdfString::text(producer)));
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::String(PdfString::text(&pdf_date(date))));
        }

        dict
    }
}

/// Format a timestamp as a PDF date string, e.g. `D:20240131120000Z`
pub fn pdf_date(date: DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSize {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 8.5 x 11 inches
    Letter,
}

impl PageSize {
    pub fn media_box(&self) -> MediaBox {
        match self {
            PageSize::A4 => MediaBox::a4(),
            PageSize::Letter => MediaBox::letter(),
        }
    }
}

/// Page media box (page dimensions)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    /// Lower-left x coordinate
    pub llx: f64,
    /// Lower-left y coordinate
    pub lly: f64,
    /// Upper-right x coordinate
    pub urx: f64,
    /// Upper-right y coordinate
    pub ury: f64,
}

impl MediaBox {
    /// Create a media box from dimensions (origin at lower-left)
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self {
            llx: 0.0,
            lly: 0.0,
            urx: width,
            ury: height,
        }
    }

    /// US Letter size (8.5 x 11 inches)
    pub fn letter() -> Self {
        Self::from_dimensions(612.0, 792.0)
    }

    /// A4 size (210 x 297 mm)
    pub fn a4() -> Self {
        Self::from_dimensions(595.0, 842.0)
    }

    /// Convert to PDF array
    pub fn to_array(&self) -> PdfObject {
        PdfObject::Array(vec![
            PdfObject::Real(self.llx),
            PdfObject::Real(self.lly),
            PdfObject::Real(self.urx),
            PdfObject::Real(self.ury),
        ])
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}

impl Default for MediaBox {
    fn default() -> Self {
        Self::a4()
    }
}

/// Where a full-page image sits on its page, in points from the lower-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub media_box: MediaBox,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PagePlacement {
    /// Image covering the whole page
    pub fn full_page(media_box: MediaBox) -> Self {
        Self {
            media_box,
            x: 0.0,
            y: 0.0,
            width: media_box.width(),
            height: media_box.height(),
        }
    }

    /// Whether part of the image falls outside the page
    pub fn overflows(&self) -> bool {
        self.y < 0.0 || self.x + self.width > self.media_box.width()
    }
}

/// PDF page object
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub media_box: MediaBox,
    /// Content stream reference (object number)
    pub content_ref: Option<u32>,
    /// Image XObject resources (name -> object reference)
    pub images: BTreeMap<String, u32>,
}

impl PdfPage {
    /// Create a new page with the given media box
    pub fn new(media_box: MediaBox) -> Self {
        Self {
            media_box,
            content_ref: None,
            images: BTreeMap::new(),
        }
    }

    /// Set the content stream reference
    pub fn with_content(mut self, content_ref: u32) -> Self {
        self.content_ref = Some(content_ref);
        self
    }

    /// Add an image resource
    pub fn add_image(&mut self, name: impl Into<String>, obj_ref: u32) {
        self.images.insert(name.into(), obj_ref);
    }

    /// Build the resources dictionary
    pub fn build_resources(&self) -> PdfDictionary {
        let mut resources = PdfDictionary::new();

        if !self.images.is_empty() {
            let mut xobject_dict = PdfDictionary::new();
            for (name, obj_ref) in &self.images {
                xobject_dict.insert(name.clone(), PdfObject::reference(*obj_ref));
            }
            resources.insert("XObject", PdfObject::Dictionary(xobject_dict));
        }

        // ProcSet is obsolete since 1.4 but older viewers still look for it
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
        );

        resources
    }

    /// Build the page dictionary
    pub fn to_dictionary(&self, parent_ref: u32) -> PdfDictionary {
        let mut dict = PdfDictionary::new().with_type("Page");

        dict.insert("Parent", PdfObject::reference(parent_ref));
        dict.insert("MediaBox", self.media_box.to_array());
        dict.insert("Resources", PdfObject::Dictionary(self.build_resources()));

        if let Some(content_ref) = self.content_ref {
            dict.insert("Contents", PdfObject::reference(content_ref));
        }

        dict
    }
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::reference(pages_ref));
    dict
}

/// Create a pages dictionary (page tree root)
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");
    let kids: Vec<PdfObject> = page_refs.iter().map(|&r| PdfObject::reference(r)).collect();
    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    dict
}
