//! Plain-text rendering
//!
//! Produces a flat, human-readable resume: a header block, then one titled
//! section per resume part, each underlined with a dashed rule. Output is a
//! pure function of the document and the configured [`ResponsibilityStyle`];
//! lines are separated by `\n` only.

use resume_model::{join_skills, Education, Experience, ResumeDocument};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const HEADER_RULE: &str = "====================================";
const SECTION_RULE: &str = "------------------------------------";

/// How the free-text responsibilities of an experience entry are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponsibilityStyle {
    /// Verbatim, as typed
    Raw,
    /// One `  - item` line per non-empty line
    #[default]
    Bulleted,
}

/// Text renderer options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    pub responsibility_style: ResponsibilityStyle,
}

/// Renders a [`ResumeDocument`] as plain text
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    style: ResponsibilityStyle,
}

impl TextFormatter {
    pub fn new(options: &TextOptions) -> Self {
        Self {
            style: options.responsibility_style,
        }
    }

    pub fn with_style(style: ResponsibilityStyle) -> Self {
        Self { style }
    }

    /// Render the whole document. Never fails; empty fields yield empty
    /// lines or are skipped, never a placeholder.
    pub fn format(&self, doc: &ResumeDocument) -> String {
        let mut out = String::new();

        push_line(&mut out, &doc.name);
        push_line(&mut out, &doc.contact_line());
        push_line(&mut out, HEADER_RULE);
        out.push('\n');

        push_section(&mut out, "SUMMARY", doc.summary.trim_end());
        push_section(&mut out, "SKILLS", &join_skills(&doc.skills));

        let experience: Vec<String> = doc.experience.iter().map(|e| self.experience_entry(e)).collect();
        push_section(&mut out, "WORK EXPERIENCE", &experience.join("\n\n"));

        let education: Vec<String> = doc.education.iter().map(education_entry).collect();
        push_section(&mut out, "EDUCATION", &education.join("\n\n"));

        if !doc.awards.is_empty() {
            let awards: Vec<String> = doc
                .awards
                .iter()
                .map(|a| join_lines([a.name.clone(), a.details(", ")]))
                .collect();
            push_section(&mut out, "AWARDS & CERTIFICATIONS", &awards.join("\n\n"));
        }

        push_section(&mut out, "REFERENCES", &doc.reference_lines().join("\n"));

        // exactly one trailing newline
        while out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    fn experience_entry(&self, exp: &Experience) -> String {
        let mut heading = exp.title.to_uppercase();
        if !exp.company.is_empty() {
            if !heading.is_empty() {
                heading.push_str(" | ");
            }
            heading.push_str(&exp.company);
        }

        let responsibilities = match self.style {
            ResponsibilityStyle::Raw => exp.responsibilities.trim_end().to_string(),
            ResponsibilityStyle::Bulleted => exp
                .bullet_items()
                .map(|item| format!("  - {}", item.trim()))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        join_lines([heading, exp.duration.clone(), responsibilities])
    }
}

fn education_entry(edu: &Education) -> String {
    let mut degree = edu.degree.clone();
    if !edu.year.is_empty() {
        if degree.is_empty() {
            degree = edu.year.clone();
        } else {
            degree.push_str(&format!(" ({})", edu.year));
        }
    }
    join_lines([edu.school.clone(), degree, edu.details.clone()])
}

fn join_lines<const N: usize>(lines: [String; N]) -> String {
    lines
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// CRLF and lone CR both become LF
fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(&normalize_newlines(line));
    out.push('\n');
}

fn push_section(out: &mut String, title: &str, body: &str) {
    push_line(out, title);
    push_line(out, SECTION_RULE);
    if !body.is_empty() {
        push_line(out, body);
    }
    out.push('\n');
}
