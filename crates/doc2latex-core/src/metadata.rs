//! Canonical metadata record handed to the template renderer.
//!
//! Built once per conversion from the [`DocumentAnalysis`], with any
//! caller-supplied overrides taking precedence. Overrides are written back
//! into the analysis so every later consumer sees the same title and author.

use serde::Serialize;
use tracing::debug;

use crate::analysis::DocumentAnalysis;

pub const DEFAULT_LANGUAGE: &str = "formal_english";
pub const DEFAULT_FILE_NUMBER: &str = "No. 1/1/2025-Desk";

/// Template selector meaning "use what the classifier suggested".
pub const AUTO_TEMPLATE: &str = "auto";

/// Caller-supplied values that win over classification output.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subtitle: Option<String>,
    /// Template id, or `"auto"` to keep the suggested one.
    pub template: Option<String>,
}

impl Overrides {
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    pub fn subtitle(&self) -> Option<&str> {
        non_blank(self.subtitle.as_deref())
    }

    pub fn template(&self) -> Option<&str> {
        non_blank(self.template.as_deref()).filter(|t| *t != AUTO_TEMPLATE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Document metadata over a fixed key set. Values are raw text; the
/// renderer escapes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub department: String,
    pub classification: String,
    pub document_type: String,
    pub template: String,
    pub date: String,
    pub summary: String,
    pub keywords: String,
    pub language: String,
    pub confidence: String,
    pub file_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl Metadata {
    pub const KEYS: [&'static str; 12] = [
        "title",
        "author",
        "department",
        "classification",
        "document_type",
        "template",
        "date",
        "summary",
        "keywords",
        "language",
        "confidence",
        "file_number",
    ];

    /// Mapping-style access by key name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "title" => &self.title,
            "author" => &self.author,
            "department" => &self.department,
            "classification" => &self.classification,
            "document_type" => &self.document_type,
            "template" => &self.template,
            "date" => &self.date,
            "summary" => &self.summary,
            "keywords" => &self.keywords,
            "language" => &self.language,
            "confidence" => &self.confidence,
            "file_number" => &self.file_number,
            "subtitle" => return self.subtitle.as_deref(),
            _ => return None,
        };
        Some(value)
    }
}

/// Today's date in the form used on documents, e.g. `19 October 2026`.
pub fn today() -> String {
    chrono::Local::now().format("%d %B %Y").to_string()
}

/// Build the metadata record, dated today.
pub fn assemble(analysis: &mut DocumentAnalysis, overrides: &Overrides) -> Metadata {
    assemble_dated(analysis, overrides, today())
}

/// Build the metadata record with an explicit date string.
pub fn assemble_dated(
    analysis: &mut DocumentAnalysis,
    overrides: &Overrides,
    date: String,
) -> Metadata {
    if let Some(title) = overrides.title() {
        debug!(from = %analysis.title, to = title, "title overridden");
        analysis.title = title.to_string();
    }
    if let Some(author) = overrides.author() {
        debug!(from = %analysis.author, to = author, "author overridden");
        analysis.author = author.to_string();
    }

    let template = overrides
        .template()
        .unwrap_or(analysis.suggested_template.as_str())
        .to_string();

    Metadata {
        title: analysis.title.clone(),
        author: analysis.author.clone(),
        department: analysis.department.clone(),
        classification: analysis.classification.clone(),
        document_type: analysis.document_type.to_string(),
        template,
        date,
        summary: analysis.summary.clone(),
        keywords: analysis.key_sections.join(", "),
        language: analysis
            .requirement("language_style")
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string(),
        // Debug formatting keeps the fractional part: 0.0 → "0.0", 0.95 → "0.95".
        confidence: format!("{:?}", analysis.confidence_score),
        file_number: analysis
            .requirement("file_number")
            .unwrap_or(DEFAULT_FILE_NUMBER)
            .to_string(),
        subtitle: overrides.subtitle().map(str::to_string),
    }
}
