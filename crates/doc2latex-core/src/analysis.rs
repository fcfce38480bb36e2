//! Classification result types shared by every pipeline stage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownDocumentType;

/// Template used when classification offers nothing better.
pub const DEFAULT_TEMPLATE: &str = "indian_government";

pub const DEFAULT_TITLE: &str = "Document";
pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_DEPARTMENT: &str = "Unknown Department";
pub const DEFAULT_CLASSIFICATION: &str = "Public";
pub const DEFAULT_SUMMARY: &str = "Document analysis failed";

/// The closed set of document kinds the rule engine and templates know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    OfficeMemorandum,
    Circular,
    Notification,
    ResearchPaper,
    Report,
    Letter,
    PolicyDocument,
    TenderDocument,
    AcademicPaper,
    LegalDocument,
    FinancialReport,
    Unknown,
}

impl DocumentType {
    pub const ALL: [DocumentType; 12] = [
        Self::OfficeMemorandum,
        Self::Circular,
        Self::Notification,
        Self::ResearchPaper,
        Self::Report,
        Self::Letter,
        Self::PolicyDocument,
        Self::TenderDocument,
        Self::AcademicPaper,
        Self::LegalDocument,
        Self::FinancialReport,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfficeMemorandum => "office_memorandum",
            Self::Circular => "circular",
            Self::Notification => "notification",
            Self::ResearchPaper => "research_paper",
            Self::Report => "report",
            Self::Letter => "letter",
            Self::PolicyDocument => "policy_document",
            Self::TenderDocument => "tender_document",
            Self::AcademicPaper => "academic_paper",
            Self::LegalDocument => "legal_document",
            Self::FinancialReport => "financial_report",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// Classification of a single document: type, authorship, and formatting hints.
///
/// Always fully populated. When the classifier cannot trust the service
/// response it substitutes [`DocumentAnalysis::fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub document_type: DocumentType,
    pub title: String,
    pub author: String,
    pub department: String,
    /// Sensitivity label: Public, Restricted, Confidential, Secret.
    pub classification: String,
    pub summary: String,
    pub key_sections: Vec<String>,
    /// Free-form directives such as `numbering_style` or `language_style`.
    pub formatting_requirements: BTreeMap<String, String>,
    pub suggested_template: String,
    /// Always finite and within `[0, 1]`.
    pub confidence_score: f64,
}

impl DocumentAnalysis {
    /// The fail-soft analysis, pointing at the given default template.
    pub fn fallback(default_template: &str) -> Self {
        Self {
            document_type: DocumentType::Unknown,
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            department: DEFAULT_DEPARTMENT.to_string(),
            classification: DEFAULT_CLASSIFICATION.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            key_sections: Vec::new(),
            formatting_requirements: BTreeMap::new(),
            suggested_template: default_template.to_string(),
            confidence_score: 0.0,
        }
    }

    /// Look up a formatting directive.
    pub fn requirement(&self, key: &str) -> Option<&str> {
        self.formatting_requirements.get(key).map(String::as_str)
    }
}

impl Default for DocumentAnalysis {
    fn default() -> Self {
        Self::fallback(DEFAULT_TEMPLATE)
    }
}
