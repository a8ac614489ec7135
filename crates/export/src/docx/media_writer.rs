//! Media writer for DOCX files
//!
//! Assigns a media part and an image relationship to every image block, in
//! document order, and emits the inline `w:drawing` markup that references
//! them.

use super::content_types::ContentTypes;
use super::error::{DocxError, DocxResult};
use super::escape_xml;
use super::relationship_types;
use super::relationships::Relationships;
use doc_model::{DocumentTree, ImageBlock};
use std::collections::HashSet;

/// A media part ready to be written into `word/media/`
#[derive(Debug, Clone)]
pub struct MediaPart {
    /// Archive path, e.g. `word/media/photo.png`
    pub path: String,
    /// Relationship ID used by `r:embed`
    pub rel_id: String,
    pub data: Vec<u8>,
}

/// Collects media parts for a tree
pub struct MediaWriter;

impl MediaWriter {
    pub fn new() -> Self {
        Self
    }

    /// Register every image of `tree`, returning parts in document order.
    ///
    /// Relationships and content-type defaults are added as a side effect so
    /// the document writer can reference the returned IDs.
    pub fn collect(
        &self,
        tree: &DocumentTree,
        rels: &mut Relationships,
        content_types: &mut ContentTypes,
    ) -> DocxResult<Vec<MediaPart>> {
        let mut parts = Vec::new();
        let mut used_names = HashSet::new();

        for (index, image) in tree.images().enumerate() {
            if image.data.is_empty() {
                return Err(DocxError::InvalidStructure(format!(
                    "image '{}' has no data",
                    image.name
                )));
            }

            let file_name = unique_name(image, index, &mut used_names);
            let rel_id = rels.add(relationship_types::IMAGE, &format!("media/{}", file_name));
            content_types.add_default(image.format.extension(), image.format.content_type());

            parts.push(MediaPart {
                path: format!("word/media/{}", file_name),
                rel_id,
                data: image.data.clone(),
            });
        }

        Ok(parts)
    }
}

impl Default for MediaWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_name(image: &ImageBlock, index: usize, used: &mut HashSet<String>) -> String {
    let name = image.file_name();
    if used.insert(name.clone()) {
        return name;
    }
    let fallback = format!("image{}.{}", index + 1, image.format.extension());
    used.insert(fallback.clone());
    fallback
}

/// Generate a w:drawing element for an inline image; `name` doubles as the
/// alt text
pub fn generate_inline_drawing(rel_id: &str, doc_pr_id: usize, width_emu: i64, height_emu: i64, name: &str) -> String {
    let name = escape_xml(name);
    format!(
        concat!(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="{id}" name="{name}" descr="{name}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="{pic_ns}">"#,
            r#"<pic:pic xmlns:pic="{pic_ns}">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        ),
        cx = width_emu,
        cy = height_emu,
        id = doc_pr_id,
        pic_ns = super::namespaces::PIC,
        rel = rel_id,
        name = name,
    )
}

/// Convert CSS pixels (96 per inch) to EMUs.
/// 1 inch = 914400 EMUs, so 1 px = 9525 EMUs
pub fn pixels_to_emu(pixels: u32) -> i64 {
    pixels as i64 * 9525
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{ImageFormat, SectionBlock};

    fn tree_with(images: Vec<ImageBlock>) -> DocumentTree {
        DocumentTree::from_sections(vec![SectionBlock::untitled(
            images.into_iter().map(Into::into).collect(),
        )])
    }

    #[test]
    fn test_collect_registers_parts() {
        let tree = tree_with(vec![ImageBlock::new("photo", vec![1, 2], ImageFormat::Png, 2, 2)]);
        let mut rels = Relationships::new();
        let mut ct = ContentTypes::new();

        let parts = MediaWriter::new().collect(&tree, &mut rels, &mut ct).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].path, "word/media/photo.png");
        assert_eq!(rels.get(&parts[0].rel_id).unwrap().target, "media/photo.png");
        assert_eq!(ct.defaults.get("png").map(String::as_str), Some("image/png"));
    }

    #[test]
    fn test_duplicate_names_are_renamed() {
        let tree = tree_with(vec![
            ImageBlock::new("photo", vec![1], ImageFormat::Jpeg, 1, 1),
            ImageBlock::new("photo", vec![2], ImageFormat::Jpeg, 1, 1),
        ]);
        let parts = MediaWriter::new()
            .collect(&tree, &mut Relationships::new(), &mut ContentTypes::new())
            .unwrap();
        assert_eq!(parts[0].path, "word/media/photo.jpeg");
        assert_eq!(parts[1].path, "word/media/image2.jpeg");
    }

    #[test]
    fn test_empty_image_rejected() {
        let tree = tree_with(vec![ImageBlock::new("photo", Vec::new(), ImageFormat::Png, 1, 1)]);
        let result = MediaWriter::new().collect(&tree, &mut Relationships::new(), &mut ContentTypes::new());
        assert!(matches!(result, Err(DocxError::InvalidStructure(_))));
    }

    #[test]
    fn test_inline_drawing_markup() {
        let xml = generate_inline_drawing("rId4", 1, pixels_to_emu(150), pixels_to_emu(150), "photo");
        assert!(xml.contains(r#"r:embed="rId4""#));
        assert!(xml.contains(r#"cx="1428750""#));
        assert!(xml.contains(r#"descr="photo""#));
    }

    #[test]
    fn test_inline_drawing_attributes_are_sanitized() {
        let xml = generate_inline_drawing("rId4", 1, 1, 1, "a\u{0C}\"b\"");
        assert!(xml.contains(r#"name="a&quot;b&quot;""#));
        assert!(!xml.contains('\u{0C}'));
    }
}
