//! Decides whether rule-based output needs a second service pass.
//!
//! Six indicators, OR-combined. The thresholds are fixed.

use doc2latex_core::{DocumentAnalysis, DocumentType};

/// Restructured text longer than this (in characters) is escalated.
pub const LENGTH_THRESHOLD: usize = 3000;
/// Classifications below this confidence are escalated.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Types whose structure rules alone never cover well.
pub const INHERENTLY_COMPLEX: [DocumentType; 2] =
    [DocumentType::LegalDocument, DocumentType::PolicyDocument];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityIndicator {
    LongText,
    LowConfidence,
    UnknownType,
    ComplexTable,
    MathematicalFormula,
    ComplexType,
}

impl ComplexityIndicator {
    pub const ALL: [ComplexityIndicator; 6] = [
        Self::LongText,
        Self::LowConfidence,
        Self::UnknownType,
        Self::ComplexTable,
        Self::MathematicalFormula,
        Self::ComplexType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongText => "long_text",
            Self::LowConfidence => "low_confidence",
            Self::UnknownType => "unknown_type",
            Self::ComplexTable => "complex_table",
            Self::MathematicalFormula => "mathematical_formula",
            Self::ComplexType => "complex_type",
        }
    }

    /// Whether this indicator fires. `lowered` is `restructured` in lowercase.
    fn fires(self, restructured: &str, lowered: &str, analysis: &DocumentAnalysis) -> bool {
        match self {
            Self::LongText => restructured.chars().count() > LENGTH_THRESHOLD,
            Self::LowConfidence => analysis.confidence_score < CONFIDENCE_THRESHOLD,
            Self::UnknownType => analysis.document_type == DocumentType::Unknown,
            Self::ComplexTable => lowered.contains("complex table"),
            Self::MathematicalFormula => lowered.contains("mathematical formula"),
            Self::ComplexType => INHERENTLY_COMPLEX.contains(&analysis.document_type),
        }
    }
}

/// Every indicator that fires for this output, in declaration order.
pub fn indicators(restructured: &str, analysis: &DocumentAnalysis) -> Vec<ComplexityIndicator> {
    let lowered = restructured.to_lowercase();
    ComplexityIndicator::ALL
        .into_iter()
        .filter(|i| i.fires(restructured, &lowered, analysis))
        .collect()
}

/// True when any indicator fires.
pub fn needs_enhancement(restructured: &str, analysis: &DocumentAnalysis) -> bool {
    !indicators(restructured, analysis).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(document_type: DocumentType, confidence: f64) -> DocumentAnalysis {
        let mut a = DocumentAnalysis::default();
        a.document_type = document_type;
        a.confidence_score = confidence;
        a
    }

    #[test]
    fn length_alone_triggers() {
        let a = analysis(DocumentType::Report, 0.95);
        let text = "a".repeat(3001);
        assert!(needs_enhancement(&text, &a));
        assert_eq!(indicators(&text, &a), vec![ComplexityIndicator::LongText]);
    }

    #[test]
    fn boundary_length_does_not_trigger() {
        let a = analysis(DocumentType::Report, 0.95);
        assert!(!needs_enhancement(&"a".repeat(3000), &a));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let a = analysis(DocumentType::Report, 0.95);
        assert!(!needs_enhancement(&"न".repeat(2000), &a));
    }

    #[test]
    fn short_confident_report_does_not_trigger() {
        let a = analysis(DocumentType::Report, 0.95);
        assert!(!needs_enhancement(&"a".repeat(100), &a));
    }

    #[test]
    fn low_confidence_triggers() {
        let a = analysis(DocumentType::Report, 0.69);
        assert_eq!(indicators("short", &a), vec![ComplexityIndicator::LowConfidence]);
        assert!(!needs_enhancement("short", &analysis(DocumentType::Report, 0.7)));
    }

    #[test]
    fn unknown_type_triggers() {
        let a = analysis(DocumentType::Unknown, 0.9);
        assert_eq!(indicators("short", &a), vec![ComplexityIndicator::UnknownType]);
    }

    #[test]
    fn content_markers_are_case_insensitive() {
        let a = analysis(DocumentType::Circular, 0.9);
        assert_eq!(
            indicators("See the Complex Table below", &a),
            vec![ComplexityIndicator::ComplexTable]
        );
        assert_eq!(
            indicators("a MATHEMATICAL FORMULA follows", &a),
            vec![ComplexityIndicator::MathematicalFormula]
        );
    }

    #[test]
    fn inherently_complex_types_trigger() {
        for t in INHERENTLY_COMPLEX {
            assert_eq!(indicators("short", &analysis(t, 0.99)), vec![
                ComplexityIndicator::ComplexType
            ]);
        }
        assert!(!needs_enhancement("short", &analysis(DocumentType::TenderDocument, 0.99)));
    }

    #[test]
    fn default_analysis_fires_two_indicators() {
        let a = DocumentAnalysis::default();
        assert_eq!(indicators("x", &a), vec![
            ComplexityIndicator::LowConfidence,
            ComplexityIndicator::UnknownType
        ]);
    }
}
