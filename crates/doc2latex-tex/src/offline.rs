//! Conversion without the text-understanding service.
//!
//! Line heuristics only: long all-caps lines become title-cased sections,
//! `Subject:` lines subsections, reference lines (`No.`, `Dated:`) bold and
//! short parenthesised lines italic signatures. Every line is escaped here,
//! so the result is rendered through the minimal template as-is.

use doc2latex_core::{DocumentAnalysis, Metadata, Overrides, assemble_dated, text};

use crate::escape::{clean_layout, escape_plain};
use crate::templates::{TemplateId, render_escaped};

pub const OFFLINE_AUTHOR: &str = "Author";

const HEADING_MIN_LEN: usize = 10;
const SIGNATURE_MAX_LEN: usize = 50;

#[derive(Debug, Clone)]
pub struct OfflineDocument {
    pub latex: String,
    pub body: String,
    pub metadata: Metadata,
    /// Fallback analysis with the overrides applied.
    pub analysis: DocumentAnalysis,
}

/// Convert normalised text into a complete minimal document.
pub fn convert(text: &str, overrides: &Overrides, date: String) -> OfflineDocument {
    let body = to_latex_body(text);
    let mut analysis = DocumentAnalysis::fallback(TemplateId::Minimal.as_str());
    analysis.author = OFFLINE_AUTHOR.to_string();
    let overrides = Overrides {
        template: Some(TemplateId::Minimal.as_str().to_string()),
        ..overrides.clone()
    };
    let metadata = assemble_dated(&mut analysis, &overrides, date);
    let latex = render_escaped(TemplateId::Minimal, &metadata, &clean_layout(&body));
    OfflineDocument {
        latex,
        body,
        metadata,
        analysis,
    }
}

/// Escaped LaTeX body, one paragraph per non-blank source line.
pub fn to_latex_body(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text::lines(text) {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        if is_upper(line) && line.chars().count() > HEADING_MIN_LEN {
            out.push(format!("\\section{{{}}}", escape_plain(&title_case(line))));
        } else if line.starts_with("Subject:") {
            out.push(format!("\\subsection{{{}}}", escape_plain(line)));
        } else if line.starts_with("No.") || line.starts_with("Dated:") {
            out.push(format!("\\textbf{{{}}}", escape_plain(line)));
            out.push(String::new());
        } else if line.contains('(')
            && line.ends_with(')')
            && line.chars().count() < SIGNATURE_MAX_LEN
        {
            out.push("\\vspace{1em}".to_string());
            out.push(format!("\\textit{{{}}}", escape_plain(line)));
        } else {
            out.push(escape_plain(line));
        }
        out.push(String::new());
    }
    out.join("\n")
}

/// At least one cased character and no lowercase ones.
fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Capitalise the first letter of each alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
