//! Resume to document tree
//!
//! The tree is assembled from immutable section blocks in one fixed order:
//! photo, title, contact line, Summary, Skills, Work Experience, Education,
//! Awards & Certifications (only when present), References.

use super::error::DocxResult;
use super::photo::decode_photo;
use super::writer::write_docx;
use super::DocxOptions;
use doc_model::{Alignment, Block, DocumentTree, Paragraph, Run, SectionBlock, StyleId};
use resume_model::{join_skills, ResumeDocument};

const TITLE_PT: f32 = 24.0;
const CONTACT_PT: f32 = 11.0;
const ENTRY_TITLE_PT: f32 = 14.0;
const ENTRY_DETAIL_PT: f32 = 12.0;

/// Builds the word-processing tree for a resume and packs it
#[derive(Debug, Clone, Default)]
pub struct DocumentModelBuilder {
    options: DocxOptions,
}

impl DocumentModelBuilder {
    pub fn new(options: DocxOptions) -> Self {
        Self { options }
    }

    /// Build the document tree.
    ///
    /// A photo that cannot be decoded is logged and left out; it never fails
    /// the build.
    pub async fn build(&self, doc: &ResumeDocument) -> DocumentTree {
        let photo = self.photo_section(doc).await;

        let sections = [
            photo,
            Some(header_section(doc)),
            Some(text_section("Summary", &doc.summary)),
            Some(text_section("Skills", &join_skills(&doc.skills))),
            Some(experience_section(doc)),
            Some(education_section(doc)),
            awards_section(doc),
            Some(references_section(doc)),
        ];

        DocumentTree::from_sections(sections.into_iter().flatten())
    }

    /// Pack a tree into DOCX bytes on a blocking worker
    pub async fn pack(&self, tree: &DocumentTree) -> DocxResult<Vec<u8>> {
        let tree = tree.clone();
        tokio::task::spawn_blocking(move || write_docx(&tree)).await?
    }

    /// Build and pack in one step
    pub async fn render(&self, doc: &ResumeDocument) -> DocxResult<Vec<u8>> {
        let tree = self.build(doc).await;
        self.pack(&tree).await
    }

    async fn photo_section(&self, doc: &ResumeDocument) -> Option<SectionBlock> {
        let source = doc.photo.clone().filter(|p| !p.trim().is_empty())?;
        let size = self.options.photo_size_px;

        match tokio::task::spawn_blocking(move || decode_photo(&source, size)).await {
            Ok(Ok(image)) => Some(SectionBlock::untitled(vec![image.into()])),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "could not process photo for docx, continuing without it");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "photo decoding task failed, continuing without it");
                None
            }
        }
    }
}

fn header_section(doc: &ResumeDocument) -> SectionBlock {
    let title = Paragraph::new()
        .with_run(Run::new(doc.name.as_str()).bold().size(TITLE_PT))
        .with_style(StyleId::TITLE)
        .aligned(Alignment::Center);
    let contact = Paragraph::new()
        .with_run(Run::new(doc.contact_line()).size(CONTACT_PT))
        .aligned(Alignment::Center);
    SectionBlock::untitled(vec![title.into(), contact.into()])
}

fn text_section(heading: &str, body: &str) -> SectionBlock {
    SectionBlock::titled(heading, vec![Paragraph::text(body).into()])
}

/// Bold title line, optional italic detail line, then spacer
fn entry_blocks(title: String, detail: String) -> Vec<Block> {
    let mut blocks: Vec<Block> = vec![Paragraph::new()
        .with_run(Run::new(title).bold().size(ENTRY_TITLE_PT))
        .into()];
    if !detail.is_empty() {
        blocks.push(
            Paragraph::new()
                .with_run(Run::new(detail).italic().size(ENTRY_DETAIL_PT))
                .into(),
        );
    }
    blocks
}

fn experience_section(doc: &ResumeDocument) -> SectionBlock {
    let mut blocks = Vec::new();
    for exp in &doc.experience {
        let detail = join_non_empty(&exp.company, &exp.duration, " | ");
        blocks.extend(entry_blocks(exp.title.clone(), detail));
        blocks.extend(exp.bullet_items().map(|item| Block::from(Paragraph::bullet(item.trim(), 0))));
        blocks.push(Paragraph::spacer().into());
    }
    SectionBlock::titled("Work Experience", blocks)
}

fn education_section(doc: &ResumeDocument) -> SectionBlock {
    let mut blocks = Vec::new();
    for edu in &doc.education {
        let detail = join_non_empty(&edu.year, &edu.details, " | ");
        blocks.extend(entry_blocks(edu.headline(), detail));
        blocks.push(Paragraph::spacer().into());
    }
    SectionBlock::titled("Education", blocks)
}

fn awards_section(doc: &ResumeDocument) -> Option<SectionBlock> {
    if doc.awards.is_empty() {
        return None;
    }
    let mut blocks = Vec::new();
    for award in &doc.awards {
        blocks.extend(entry_blocks(award.name.clone(), award.details(" | ")));
        blocks.push(Paragraph::spacer().into());
    }
    Some(SectionBlock::titled("Awards & Certifications", blocks))
}

fn references_section(doc: &ResumeDocument) -> SectionBlock {
    let blocks = doc
        .reference_lines()
        .into_iter()
        .map(|line| Paragraph::text(line).into())
        .collect();
    SectionBlock::titled("References", blocks)
}

fn join_non_empty(a: &str, b: &str, sep: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => format!("{}{}{}", a, sep, b),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (true, true) => String::new(),
    }
}
