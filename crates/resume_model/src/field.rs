//! Typed field addressing
//!
//! Editors address a field as a scalar selector or as an entry kind, an
//! index into that entry list and a per-kind field selector. No string
//! paths are parsed.

use crate::document::{Award, Education, Experience, Reference, ResumeDocument};
use crate::error::{ModelError, Result};
use crate::skills::{join_skills, parse_skills};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The repeatable sections of a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Experience,
    Education,
    Award,
    Reference,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Award => "award",
            EntryKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Title,
    Company,
    Duration,
    Responsibilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    Year,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AwardField {
    Name,
    Issuer,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceField {
    Name,
    Relation,
    Contact,
}

/// Address of one editable text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum FieldRef {
    Name,
    Email,
    Phone,
    Address,
    Summary,
    /// The comma-separated skills source
    Skills,
    Experience { index: usize, field: ExperienceField },
    Education { index: usize, field: EducationField },
    Award { index: usize, field: AwardField },
    Reference { index: usize, field: ReferenceField },
}

impl FieldRef {
    /// The entry list this field lives in, if any
    pub fn entry_kind(&self) -> Option<EntryKind> {
        match self {
            FieldRef::Experience { .. } => Some(EntryKind::Experience),
            FieldRef::Education { .. } => Some(EntryKind::Education),
            FieldRef::Award { .. } => Some(EntryKind::Award),
            FieldRef::Reference { .. } => Some(EntryKind::Reference),
            _ => None,
        }
    }
}

fn entry<T>(items: &[T], kind: EntryKind, index: usize) -> Result<&T> {
    items.get(index).ok_or(ModelError::IndexOutOfRange {
        kind,
        index,
        len: items.len(),
    })
}

fn entry_mut<T>(items: &mut [T], kind: EntryKind, index: usize) -> Result<&mut T> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(ModelError::IndexOutOfRange { kind, index, len })
}

impl ResumeDocument {
    /// Read a field's current text
    pub fn field(&self, field: FieldRef) -> Result<String> {
        let value = match field {
            FieldRef::Name => self.name.clone(),
            FieldRef::Email => self.email.clone(),
            FieldRef::Phone => self.phone.clone(),
            FieldRef::Address => self.address.clone(),
            FieldRef::Summary => self.summary.clone(),
            FieldRef::Skills => join_skills(&self.skills),
            FieldRef::Experience { index, field } => {
                let exp = entry(&self.experience, EntryKind::Experience, index)?;
                match field {
                    ExperienceField::Title => exp.title.clone(),
                    ExperienceField::Company => exp.company.clone(),
                    ExperienceField::Duration => exp.duration.clone(),
                    ExperienceField::Responsibilities => exp.responsibilities.clone(),
                }
            }
            FieldRef::Education { index, field } => {
                let edu = entry(&self.education, EntryKind::Education, index)?;
                match field {
                    EducationField::School => edu.school.clone(),
                    EducationField::Degree => edu.degree.clone(),
                    EducationField::Year => edu.year.clone(),
                    EducationField::Details => edu.details.clone(),
                }
            }
            FieldRef::Award { index, field } => {
                let award = entry(&self.awards, EntryKind::Award, index)?;
                match field {
                    AwardField::Name => award.name.clone(),
                    AwardField::Issuer => award.issuer.clone(),
                    AwardField::Year => award.year.clone(),
                }
            }
            FieldRef::Reference { index, field } => {
                let reference = entry(&self.references, EntryKind::Reference, index)?;
                match field {
                    ReferenceField::Name => reference.name.clone(),
                    ReferenceField::Relation => reference.relation.clone(),
                    ReferenceField::Contact => reference.contact.clone(),
                }
            }
        };
        Ok(value)
    }

    /// Overwrite a field. Setting `Skills` re-parses the comma-separated source.
    pub fn set_field(&mut self, field: FieldRef, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let slot = match field {
            FieldRef::Name => &mut self.name,
            FieldRef::Email => &mut self.email,
            FieldRef::Phone => &mut self.phone,
            FieldRef::Address => &mut self.address,
            FieldRef::Summary => &mut self.summary,
            FieldRef::Skills => {
                self.skills = parse_skills(&value);
                return Ok(());
            }
            FieldRef::Experience { index, field } => {
                let exp = entry_mut(&mut self.experience, EntryKind::Experience, index)?;
                match field {
                    ExperienceField::Title => &mut exp.title,
                    ExperienceField::Company => &mut exp.company,
                    ExperienceField::Duration => &mut exp.duration,
                    ExperienceField::Responsibilities => &mut exp.responsibilities,
                }
            }
            FieldRef::Education { index, field } => {
                let edu = entry_mut(&mut self.education, EntryKind::Education, index)?;
                match field {
                    EducationField::School => &mut edu.school,
                    EducationField::Degree => &mut edu.degree,
                    EducationField::Year => &mut edu.year,
                    EducationField::Details => &mut edu.details,
                }
            }
            FieldRef::Award { index, field } => {
                let award = entry_mut(&mut self.awards, EntryKind::Award, index)?;
                match field {
                    AwardField::Name => &mut award.name,
                    AwardField::Issuer => &mut award.issuer,
                    AwardField::Year => &mut award.year,
                }
            }
            FieldRef::Reference { index, field } => {
                let reference = entry_mut(&mut self.references, EntryKind::Reference, index)?;
                match field {
                    ReferenceField::Name => &mut reference.name,
                    ReferenceField::Relation => &mut reference.relation,
                    ReferenceField::Contact => &mut reference.contact,
                }
            }
        };
        *slot = value;
        Ok(())
    }

    /// Number of entries in a section
    pub fn entry_count(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Experience => self.experience.len(),
            EntryKind::Education => self.education.len(),
            EntryKind::Award => self.awards.len(),
            EntryKind::Reference => self.references.len(),
        }
    }

    /// Append an empty entry and return its index
    pub fn add_entry(&mut self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Experience => self.experience.push(Experience::default()),
            EntryKind::Education => self.education.push(Education::default()),
            EntryKind::Award => self.awards.push(Award::default()),
            EntryKind::Reference => self.references.push(Reference::default()),
        }
        self.entry_count(kind) - 1
    }

    /// Remove an entry, shifting later entries down by one
    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> Result<()> {
        let len = self.entry_count(kind);
        if index >= len {
            return Err(ModelError::IndexOutOfRange { kind, index, len });
        }
        match kind {
            EntryKind::Experience => {
                self.experience.remove(index);
            }
            EntryKind::Education => {
                self.education.remove(index);
            }
            EntryKind::Award => {
                self.awards.remove(index);
            }
            EntryKind::Reference => {
                self.references.remove(index);
            }
        }
        Ok(())
    }
}
