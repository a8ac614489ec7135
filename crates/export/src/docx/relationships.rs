//! Relationships (.rels) file generation
//!
//! DOCX uses relationships to connect parts of the document together.

use super::{escape_xml, namespaces, relationship_types};

/// A single relationship in a .rels file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative to the source part)
    pub target: String,
}

/// Ordered collection of relationships for one .rels part
#[derive(Debug, Clone)]
pub struct Relationships {
    relationships: Vec<Relationship>,
    next_id: u32,
}

impl Relationships {
    /// Create a new empty relationships collection
    pub fn new() -> Self {
        Self {
            relationships: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a relationship and return its ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;

        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });

        id
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Get the first relationship of a type
    pub fn get_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Generate XML content for the .rels file
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespaces::PKG_REL));

        for rel in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id,
                rel.rel_type,
                escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the root .rels file
pub fn create_root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::DOCUMENT, "word/document.xml");
    rels
}

/// Create the document.xml.rels with the parts every package carries
pub fn create_document_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::STYLES, "styles.xml");
    rels.add(relationship_types::SETTINGS, "settings.xml");
    rels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_relationship() {
        let mut rels = create_document_rels();
        let id = rels.add(relationship_types::IMAGE, "media/photo.png");

        assert_eq!(id, "rId3");
        assert_eq!(rels.get(&id).unwrap().target, "media/photo.png");
        assert_eq!(rels.len(), 3);
    }

    #[test]
    fn test_get_by_type() {
        let rels = create_root_rels();
        let doc_rel = rels.get_by_type(relationship_types::DOCUMENT).unwrap();
        assert_eq!(doc_rel.target, "word/document.xml");
        assert!(rels.get_by_type(relationship_types::IMAGE).is_none());
    }

    #[test]
    fn test_to_xml_keeps_insertion_order() {
        let xml = create_document_rels().to_xml();
        let styles = xml.find(r#"Id="rId1""#).unwrap();
        let settings = xml.find(r#"Id="rId2""#).unwrap();
        assert!(styles < settings);
        assert!(xml.contains(r#"Target="settings.xml""#));
    }
}
