//! End-to-end tests for the DOCX pipeline: build a tree, pack it, reopen the
//! archive and read the parts back.

use super::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use doc_model::{DocumentTree, Paragraph};
use quick_xml::events::Event;
use quick_xml::Reader;
use resume_model::{Award, Education, Experience, Reference, ResumeDocument};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn sample() -> ResumeDocument {
    ResumeDocument {
        name: "Amelia Chen".into(),
        email: "amelia@example.com".into(),
        phone: "555-0100".into(),
        address: "Portland, OR".into(),
        summary: "Backend engineer who likes R&D.".into(),
        skills: vec!["Rust".into(), "SQL".into(), "Kubernetes".into()],
        experience: vec![Experience {
            title: "Senior Engineer".into(),
            company: "Innovate Inc.".into(),
            duration: "2021 - Present".into(),
            responsibilities: "Led X\n\nBuilt Y".into(),
        }],
        education: vec![Education {
            school: "State University".into(),
            degree: "B.Sc. Computer Science".into(),
            year: "2016".into(),
            details: "Honors".into(),
        }],
        ..Default::default()
    }
}

fn png_data_uri() -> String {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 100, 50, 255]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(buf.into_inner()))
}

fn open(bytes: &[u8]) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap()
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// Text of every `w:p`, in order, as the reader of the file would see it
fn paragraph_texts(document_xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(document_xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"w:p" => current.clear(),
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"w:p" => paragraphs.push(current.clone()),
            Event::Text(t) if in_text => current.push_str(&t.unescape().unwrap()),
            Event::Eof => break,
            _ => {}
        }
    }
    paragraphs
}

#[tokio::test]
async fn test_build_orders_sections() {
    let tree = DocumentModelBuilder::default().build(&sample()).await;
    assert_eq!(
        tree.headings(),
        vec!["Summary", "Skills", "Work Experience", "Education", "References"]
    );

    let mut doc = sample();
    doc.awards.push(Award {
        name: "AWS Certified".into(),
        issuer: "Amazon".into(),
        year: "2022".into(),
    });
    let tree = DocumentModelBuilder::default().build(&doc).await;
    assert_eq!(
        tree.headings(),
        vec![
            "Summary",
            "Skills",
            "Work Experience",
            "Education",
            "Awards & Certifications",
            "References"
        ]
    );
}

#[tokio::test]
async fn test_one_bullet_per_responsibility_line() {
    let tree = DocumentModelBuilder::default().build(&sample()).await;
    let bullets: Vec<String> = tree
        .paragraphs()
        .filter(|p| p.is_bullet())
        .map(Paragraph::plain_text)
        .collect();
    assert_eq!(bullets, vec!["Led X", "Built Y"]);
}

#[tokio::test]
async fn test_header_formatting() {
    let tree = DocumentModelBuilder::default().build(&sample()).await;
    let title = tree.paragraphs().next().unwrap();
    assert_eq!(title.plain_text(), "Amelia Chen");
    assert_eq!(title.runs[0].properties.bold, Some(true));
    assert_eq!(title.runs[0].properties.font_size, Some(24.0));

    let contact = tree.paragraphs().nth(1).unwrap();
    assert_eq!(contact.plain_text(), "amelia@example.com | 555-0100 | Portland, OR");
}

#[tokio::test]
async fn test_references_fallback_and_list() {
    let tree = DocumentModelBuilder::default().build(&sample()).await;
    let last = tree.paragraphs().last().unwrap();
    assert_eq!(last.plain_text(), resume_model::REFERENCES_ON_REQUEST);

    let mut doc = sample();
    doc.references.push(Reference {
        name: "Dana Ruiz".into(),
        relation: "Manager".into(),
        contact: "dana@example.com".into(),
    });
    let tree = DocumentModelBuilder::default().build(&doc).await;
    let last = tree.paragraphs().last().unwrap();
    assert_eq!(last.plain_text(), "Dana Ruiz (Manager) - dana@example.com");
}

#[tokio::test]
async fn test_photo_comes_first() {
    let mut doc = sample();
    doc.photo = Some(png_data_uri());
    let tree = DocumentModelBuilder::new(DocxOptions { photo_size_px: 100 }).build(&doc).await;

    assert!(matches!(tree.blocks.first(), Some(doc_model::Block::Image(_))));
    let image = tree.images().next().unwrap();
    assert_eq!((image.display_width, image.display_height), (100, 100));
}

#[tokio::test]
async fn test_invalid_photo_degrades_gracefully() {
    let mut doc = sample();
    doc.photo = Some("data:image/png;base64,not-an-image".into());

    let builder = DocumentModelBuilder::default();
    let tree = builder.build(&doc).await;
    let without_photo = builder.build(&sample()).await;

    assert_eq!(tree.images().count(), 0);
    assert_eq!(tree, without_photo);

    let bytes = builder.pack(&tree).await.unwrap();
    let mut archive = open(&bytes);
    assert!(archive.file_names().all(|n| !n.starts_with("word/media/")));
    assert!(!read_part(&mut archive, "word/_rels/document.xml.rels").contains("relationships/image"));
}

#[tokio::test]
async fn test_packed_archive_parts() {
    let mut doc = sample();
    doc.photo = Some(png_data_uri());
    let bytes = DocumentModelBuilder::default().render(&doc).await.unwrap();
    let mut archive = open(&bytes);

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
        "word/settings.xml",
        "word/_rels/document.xml.rels",
        "word/media/photo.png",
    ] {
        assert!(archive.by_name(part).is_ok(), "missing part {}", part);
    }

    let content_types = read_part(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    assert!(content_types.contains("/word/numbering.xml"));

    let rels = read_part(&mut archive, "word/_rels/document.xml.rels");
    assert!(rels.contains(r#"Target="media/photo.png""#));
    assert!(rels.contains(r#"Target="numbering.xml""#));
}

#[tokio::test]
async fn test_document_text_is_complete() {
    let doc = sample();
    let bytes = DocumentModelBuilder::default().render(&doc).await.unwrap();
    let mut archive = open(&bytes);
    let texts = paragraph_texts(&read_part(&mut archive, "word/document.xml"));

    for expected in [
        "Amelia Chen",
        "Backend engineer who likes R&D.",
        "Rust, SQL, Kubernetes",
        "Senior Engineer",
        "Innovate Inc. | 2021 - Present",
        "Led X",
        "Built Y",
        "B.Sc. Computer Science - State University",
        "2016 | Honors",
    ] {
        assert!(texts.iter().any(|t| t == expected), "missing paragraph {:?}", expected);
    }
}

#[tokio::test]
async fn test_control_characters_never_reach_document_xml() {
    let mut doc = sample();
    doc.summary = "Page one\u{0C}page two \u{0B} tab\u{1} end".into();
    doc.experience[0].company = "Acme\u{7} Ltd".into();
    let bytes = DocumentModelBuilder::default().render(&doc).await.unwrap();
    let mut archive = open(&bytes);
    let xml = read_part(&mut archive, "word/document.xml");

    let forbidden: Vec<u32> = xml
        .chars()
        .filter(|&c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r'))
        .map(u32::from)
        .collect();
    assert!(forbidden.is_empty(), "forbidden characters: {:?}", forbidden);

    // The part must still parse as XML
    let texts = paragraph_texts(&xml);
    assert!(texts.iter().any(|t| t == "Page onepage two  tab end"));
    assert!(texts.iter().any(|t| t.starts_with("Acme Ltd")));
}

#[tokio::test]
async fn test_no_numbering_without_bullets() {
    let mut doc = sample();
    doc.experience.clear();
    let bytes = DocumentModelBuilder::default().render(&doc).await.unwrap();
    let mut archive = open(&bytes);
    assert!(archive.by_name("word/numbering.xml").is_err());
    assert!(!read_part(&mut archive, "[Content_Types].xml").contains("numbering"));
}

#[tokio::test]
async fn test_packing_is_deterministic() {
    let builder = DocumentModelBuilder::default();
    let a = builder.render(&sample()).await.unwrap();
    let b = builder.render(&sample()).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_empty_document_packs() {
    let tree = DocumentModelBuilder::default().build(&ResumeDocument::new()).await;
    assert!(!tree.has_bullets());
    let bytes = write_docx(&tree).unwrap();
    assert!(open(&bytes).by_name("word/document.xml").is_ok());
}

#[test]
fn test_empty_tree_has_no_media() {
    let bytes = write_docx(&DocumentTree::new()).unwrap();
    let archive = open(&bytes);
    assert!(archive.file_names().all(|n| !n.starts_with("word/media/")));
}
