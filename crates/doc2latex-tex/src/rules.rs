//! Deterministic structural restructuring.
//!
//! Four passes in fixed order:
//!
//! 1. Type-specific scaffold (header/footer) from the [`SCAFFOLDS`] table.
//!    Types without an entry pass through unchanged.
//! 2. Heading promotion: numbered or all-caps lines become `\section{}`,
//!    `N.N` lines and `Subject:` lines become `\subsection{}`.
//! 3. Numbering: trims each line, keeping line count and order.
//! 4. Paragraphs: blank-line runs collapse to one blank line and a break is
//!    inserted after sentence-terminal punctuation followed by a capital.
//!
//! Pass 4 splits abbreviations such as "U.S. Army" into separate
//! paragraphs and can break a numbered heading that ends up after a full
//! stop. That matches the established output and is kept as a known
//! limitation.

use std::sync::LazyLock;

use doc2latex_core::metadata::DEFAULT_FILE_NUMBER;
use doc2latex_core::text;
use doc2latex_core::{DocumentAnalysis, DocumentType};
use regex::Regex;
use tracing::debug;

pub const DEFAULT_DATE: &str = "__________";

// ── Heading patterns, applied to one trimmed line at a time ──
static RE_NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.?\s*[A-Z][^.]*):?\s*$").expect("valid numbered heading regex")
});
static RE_CAPS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z\s]+):?\s*$").expect("valid caps heading regex"));
static RE_SUBSECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.?\s*[A-Z][^.]*):?\s*$").expect("valid subsection regex")
});

// ── Paragraph patterns ──
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("valid blank run regex"));
static RE_SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s*([A-Z])").expect("valid sentence break regex"));

/// All-caps lines must be longer than this to count as headings.
const CAPS_HEADING_MIN_LEN: usize = 10;

type Scaffold = fn(&str, &DocumentAnalysis) -> String;

/// Header/footer handlers per document type.
pub const SCAFFOLDS: &[(DocumentType, Scaffold)] = &[
    (DocumentType::OfficeMemorandum, memorandum),
    (DocumentType::Circular, circular),
    (DocumentType::Notification, notification),
    (DocumentType::Report, report),
];

pub fn scaffold_for(document_type: DocumentType) -> Option<Scaffold> {
    SCAFFOLDS
        .iter()
        .find(|(t, _)| *t == document_type)
        .map(|(_, handler)| *handler)
}

/// Run all four passes. Total: never fails, never calls out.
pub fn restructure(text: &str, analysis: &DocumentAnalysis) -> String {
    let scaffolded = apply_scaffold(text, analysis);
    let headed = promote_headings(&scaffolded);
    let numbered = apply_numbering(&headed);
    let out = normalize_paragraphs(&numbered);
    debug!(
        document_type = %analysis.document_type,
        input_chars = text.len(),
        output_chars = out.len(),
        "rule-based restructuring complete"
    );
    out
}

pub fn apply_scaffold(text: &str, analysis: &DocumentAnalysis) -> String {
    match scaffold_for(analysis.document_type) {
        Some(handler) => handler(text, analysis),
        None => text.to_string(),
    }
}

fn file_number(analysis: &DocumentAnalysis) -> &str {
    analysis
        .requirement("file_number")
        .unwrap_or(DEFAULT_FILE_NUMBER)
}

fn date(analysis: &DocumentAnalysis) -> &str {
    analysis.requirement("date").unwrap_or(DEFAULT_DATE)
}

fn memorandum(text: &str, a: &DocumentAnalysis) -> String {
    format!(
        "File No.: {file}\nDate: {date}\n\nOFFICE MEMORANDUM\n\nSubject: {title}\n\n{text}\n\n\n({author})\n{department}\n",
        file = file_number(a),
        date = date(a),
        title = a.title,
        author = a.author,
        department = a.department,
    )
}

fn circular(text: &str, a: &DocumentAnalysis) -> String {
    format!(
        "File No.: {file}\nDate: {date}\n\nCIRCULAR\n\nSubject: {title}\n\n{text}",
        file = file_number(a),
        date = date(a),
        title = a.title,
    )
}

fn notification(text: &str, a: &DocumentAnalysis) -> String {
    format!(
        "NOTIFICATION\n\nFile No.: {file}\nDate: {date}\n\nSubject: {title}\n\n{text}",
        file = file_number(a),
        date = date(a),
        title = a.title,
    )
}

fn report(text: &str, a: &DocumentAnalysis) -> String {
    format!(
        "REPORT\n\nTitle: {title}\nPrepared by: {author}\nDepartment: {department}\nClassification: {classification}\n\nEXECUTIVE SUMMARY\n\n{text}",
        title = a.title,
        author = a.author,
        department = a.department,
        classification = a.classification,
    )
}

/// Promote heading-like lines; every other line is kept as it was.
pub fn promote_headings(text: &str) -> String {
    text.split('\n')
        .map(|line| promote_line(line.trim()).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn promote_line(line: &str) -> Option<String> {
    if let Some(caps) = RE_NUMBERED_HEADING.captures(line) {
        return Some(format!("\\section{{{}}}", &caps[1]));
    }
    if line.chars().count() > CAPS_HEADING_MIN_LEN
        && let Some(caps) = RE_CAPS_HEADING.captures(line)
    {
        return Some(format!("\\section{{{}}}", caps[1].trim_end()));
    }
    if let Some(caps) = RE_SUBSECTION.captures(line) {
        return Some(format!("\\subsection{{{}}}", &caps[1]));
    }
    if line.starts_with("Subject:") {
        return Some(format!("\\subsection{{{line}}}"));
    }
    None
}

/// Paragraph numbering pass.
///
/// Long prose lines (over 50 characters, not a command) are where
/// government paragraph numbering would be applied; today every line is
/// only trimmed, so line count and order are preserved exactly.
pub fn apply_numbering(text: &str) -> String {
    text::lines(text).collect::<Vec<_>>().join("\n")
}

pub fn normalize_paragraphs(text: &str) -> String {
    let collapsed = RE_BLANK_RUN.replace_all(text, "\n\n");
    RE_SENTENCE_BREAK
        .replace_all(&collapsed, "$1\n\n$2")
        .into_owned()
}
