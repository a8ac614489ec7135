//! ResumeDocument - the snapshot every exporter renders

use crate::skills::deserialize_skills;
use serde::{Deserialize, Serialize};

/// Fallback line rendered when no references were entered.
pub const REFERENCES_ON_REQUEST: &str = "Available upon request.";

/// One education entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    /// Year or period of completion
    pub year: String,
    pub details: String,
}

impl Education {
    /// `"{degree} - {school}"`, dropping whichever side is empty
    pub fn headline(&self) -> String {
        join_non_empty(&[&self.degree, &self.school], " - ")
    }
}

/// One work experience entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
    /// Free text; each line is one responsibility
    pub responsibilities: String,
}

impl Experience {
    /// Non-empty responsibility lines, in order.
    ///
    /// Lines are split on `\n`; a trailing `\r` is stripped so text pasted
    /// from Windows editors does not leak carriage returns.
    pub fn bullet_items(&self) -> impl Iterator<Item = &str> {
        self.responsibilities
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
    }
}

/// One award or certification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

impl Award {
    /// Issuer and year joined with `sep`, skipping empty parts
    pub fn details(&self, sep: &str) -> String {
        join_non_empty(&[&self.issuer, &self.year], sep)
    }
}

/// One professional reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub name: String,
    pub relation: String,
    pub contact: String,
}

impl Reference {
    /// Single-line rendering: `Name (Relation) - Contact`
    pub fn display_line(&self) -> String {
        let mut line = self.name.trim().to_string();
        let relation = self.relation.trim();
        if !relation.is_empty() {
            if line.is_empty() {
                line.push_str(relation);
            } else {
                line.push_str(&format!(" ({})", relation));
            }
        }
        let contact = self.contact.trim();
        if !contact.is_empty() {
            if !line.is_empty() {
                line.push_str(" - ");
            }
            line.push_str(contact);
        }
        line
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.relation.trim().is_empty() && self.contact.trim().is_empty()
    }
}

/// The canonical resume snapshot.
///
/// Text fields are never absent: missing keys deserialize to empty strings
/// and missing lists to empty vectors, so renderers can read every field
/// unconditionally. Renderers take `&ResumeDocument` and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    /// Profile photo as a `data:` URI; `None` means no photo
    #[serde(alias = "photoData", alias = "profilePhoto", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    #[serde(alias = "workExperience")]
    pub experience: Vec<Experience>,
    pub awards: Vec<Award>,
    pub references: Vec<Reference>,
}

impl ResumeDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON handed over by the editing UI
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::ModelError::InvalidData(e.to_string()))
    }

    /// Serialize back to the editor's JSON shape
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::ModelError::InvalidData(e.to_string()))
    }

    /// Email, phone and address joined with `" | "`, skipping empty parts
    pub fn contact_line(&self) -> String {
        join_non_empty(&[&self.email, &self.phone, &self.address], " | ")
    }

    /// Whether a photo payload is attached (it may still fail to decode)
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Replace or clear the photo payload
    pub fn set_photo(&mut self, photo: Option<String>) {
        self.photo = photo.filter(|p| !p.trim().is_empty());
    }

    /// Reference lines to render, or the on-request fallback when none
    /// carry any text.
    pub fn reference_lines(&self) -> Vec<String> {
        let lines: Vec<String> = self
            .references
            .iter()
            .filter(|r| !r.is_blank())
            .map(Reference::display_line)
            .collect();
        if lines.is_empty() {
            vec![REFERENCES_ON_REQUEST.to_string()]
        } else {
            lines
        }
    }
}

pub(crate) fn join_non_empty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
