//! Document classification through the text-understanding service.
//!
//! Sends a bounded excerpt, pulls the first `{` .. last `}` span out of the
//! reply and validates it field by field. Anything off (service error, no
//! JSON, a wrongly typed field, an unrecognised type, a non-numeric
//! confidence) yields the full fallback analysis. Callers never see an
//! error.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use doc2latex_core::analysis::{
    DEFAULT_AUTHOR, DEFAULT_CLASSIFICATION, DEFAULT_DEPARTMENT, DEFAULT_SUMMARY, DEFAULT_TITLE,
};
use doc2latex_core::{Config, DocumentAnalysis, DocumentType, UnknownDocumentType, text};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::InferenceError;
use crate::inference::{GenerateRequest, Inference};
use crate::prompts::{CLASSIFY_SYSTEM_PROMPT, build_classify_prompt};

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 1000;

static RE_JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON object regex"));

/// Why a classification response was rejected.
#[derive(Debug, Error)]
enum AnalysisError {
    #[error(transparent)]
    Service(#[from] InferenceError),
    #[error("no JSON object in response")]
    NoJson,
    #[error("response does not match the analysis schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownType(#[from] UnknownDocumentType),
    #[error("confidence_score is not a number: {0:?}")]
    Confidence(String),
}

/// Wire shape of the classification JSON. `null` counts as absent.
#[derive(Deserialize)]
struct RawAnalysis {
    document_type: Option<String>,
    title: Option<String>,
    author: Option<String>,
    department: Option<String>,
    classification: Option<String>,
    summary: Option<String>,
    key_sections: Option<Vec<String>>,
    formatting_requirements: Option<BTreeMap<String, String>>,
    suggested_template: Option<String>,
    confidence_score: Option<RawConfidence>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfidence {
    Number(f64),
    Text(String),
}

impl RawConfidence {
    fn resolve(self) -> Result<f64, AnalysisError> {
        let value = match self {
            Self::Number(n) => n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AnalysisError::Confidence(s.clone()))?,
        };
        if !value.is_finite() {
            return Err(AnalysisError::Confidence(value.to_string()));
        }
        Ok(value.clamp(0.0, 1.0))
    }
}

pub struct Classifier {
    service: Arc<dyn Inference>,
    model: String,
    excerpt_chars: usize,
    default_template: String,
}

impl Classifier {
    pub fn new(config: &Config, service: Arc<dyn Inference>) -> Self {
        Self {
            service,
            model: config.classification_model.clone(),
            excerpt_chars: config.classification_excerpt_chars,
            default_template: config.default_template.clone(),
        }
    }

    /// Classify `text`. Always returns a fully populated analysis.
    pub async fn analyze(&self, text: &str) -> DocumentAnalysis {
        match self.try_analyze(text).await {
            Ok(analysis) => {
                info!(
                    document_type = %analysis.document_type,
                    confidence = analysis.confidence_score,
                    template = %analysis.suggested_template,
                    "document classified"
                );
                analysis
            }
            Err(e) => {
                warn!(error = %e, "classification failed, using default analysis");
                DocumentAnalysis::fallback(&self.default_template)
            }
        }
    }

    async fn try_analyze(&self, text: &str) -> Result<DocumentAnalysis, AnalysisError> {
        let excerpt = text::excerpt(text, self.excerpt_chars);
        let request = GenerateRequest {
            model: self.model.clone(),
            system_prompt: Some(CLASSIFY_SYSTEM_PROMPT.to_string()),
            user_prompt: build_classify_prompt(excerpt),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let response = self.service.generate(&request).await?;
        debug!(
            excerpt_chars = excerpt.chars().count(),
            response_chars = response.text.len(),
            "classification response received"
        );
        parse_analysis(&response.text, &self.default_template)
    }
}

fn parse_analysis(reply: &str, default_template: &str) -> Result<DocumentAnalysis, AnalysisError> {
    let json = RE_JSON_OBJECT
        .find(reply)
        .ok_or(AnalysisError::NoJson)?
        .as_str();
    let raw: RawAnalysis = serde_json::from_str(json)?;

    let document_type = match raw.document_type {
        Some(t) => t.trim().parse::<DocumentType>()?,
        None => DocumentType::Unknown,
    };
    let confidence_score = match raw.confidence_score {
        Some(c) => c.resolve()?,
        None => 0.0,
    };

    Ok(DocumentAnalysis {
        document_type,
        title: raw.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        author: raw.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        department: raw
            .department
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        classification: raw
            .classification
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string()),
        summary: raw.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        key_sections: raw.key_sections.unwrap_or_default(),
        formatting_requirements: raw.formatting_requirements.unwrap_or_default(),
        suggested_template: raw
            .suggested_template
            .unwrap_or_else(|| default_template.to_string()),
        confidence_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::fake::Scripted;

    const FULL_REPLY: &str = r#"Here is the analysis:
```json
{
  "document_type": "circular",
  "title": "Revision of DA rates",
  "author": "Under Secretary",
  "department": "Department of Expenditure",
  "classification": "Public",
  "summary": "Revises dearness allowance {effective} from July",
  "key_sections": ["Background", "Revised rates"],
  "formatting_requirements": {"numbering_style": "indian_government", "language_style": "formal_english"},
  "suggested_template": "indian_government",
  "confidence_score": 0.92
}
```"#;

    fn classifier(svc: Arc<Scripted>) -> Classifier {
        Classifier::new(&Config::default(), svc)
    }

    fn default_tuple(a: &DocumentAnalysis, template: &str) {
        assert_eq!(a.document_type, DocumentType::Unknown);
        assert_eq!(a.title, "Document");
        assert_eq!(a.author, "Unknown");
        assert_eq!(a.department, "Unknown Department");
        assert_eq!(a.classification, "Public");
        assert_eq!(a.summary, "Document analysis failed");
        assert!(a.key_sections.is_empty());
        assert!(a.formatting_requirements.is_empty());
        assert_eq!(a.suggested_template, template);
        assert_eq!(a.confidence_score, 0.0);
    }

    #[tokio::test]
    async fn parses_fenced_json() {
        let svc = Arc::new(Scripted::new([FULL_REPLY]));
        let a = classifier(svc).analyze("text").await;
        assert_eq!(a.document_type, DocumentType::Circular);
        assert_eq!(a.title, "Revision of DA rates");
        assert_eq!(a.summary, "Revises dearness allowance {effective} from July");
        assert_eq!(a.key_sections, vec!["Background", "Revised rates"]);
        assert_eq!(a.requirement("language_style"), Some("formal_english"));
        assert_eq!(a.confidence_score, 0.92);
    }

    #[tokio::test]
    async fn service_failure_gives_exact_default() {
        let svc = Arc::new(Scripted::failing());
        let a = classifier(svc).analyze("text").await;
        default_tuple(&a, "indian_government");
    }

    #[tokio::test]
    async fn default_uses_configured_template() {
        let config = Config {
            default_template: "minimal".into(),
            ..Default::default()
        };
        let c = Classifier::new(&config, Arc::new(Scripted::new(["no json here"])));
        default_tuple(&c.analyze("text").await, "minimal");
    }

    #[tokio::test]
    async fn unknown_document_type_gives_default() {
        let svc = Arc::new(Scripted::new([r#"{"document_type": "press_release", "title": "T"}"#]));
        default_tuple(&classifier(svc).analyze("text").await, "indian_government");
    }

    #[tokio::test]
    async fn wrongly_typed_field_gives_default() {
        let svc = Arc::new(Scripted::new([
            r#"{"document_type": "report", "key_sections": "Background"}"#,
        ]));
        default_tuple(&classifier(svc).analyze("text").await, "indian_government");
    }

    #[tokio::test]
    async fn invalid_json_gives_default() {
        let svc = Arc::new(Scripted::new(["{not json}"]));
        default_tuple(&classifier(svc).analyze("text").await, "indian_government");
    }

    #[tokio::test]
    async fn missing_fields_take_defaults() {
        let svc = Arc::new(Scripted::new([r#"{"document_type": "report", "title": null}"#]));
        let a = classifier(svc).analyze("text").await;
        assert_eq!(a.document_type, DocumentType::Report);
        assert_eq!(a.title, "Document");
        assert_eq!(a.department, "Unknown Department");
        assert_eq!(a.suggested_template, "indian_government");
        assert_eq!(a.confidence_score, 0.0);
    }

    #[test]
    fn confidence_is_clamped_and_accepts_strings() {
        let parse = |c: &str| {
            parse_analysis(
                &format!(r#"{{"document_type": "letter", "confidence_score": {c}}}"#),
                "x",
            )
            .map(|a| a.confidence_score)
        };
        assert_eq!(parse("1.7").unwrap(), 1.0);
        assert_eq!(parse("-0.2").unwrap(), 0.0);
        assert_eq!(parse(r#""0.8""#).unwrap(), 0.8);
        assert_eq!(parse(r#"" 0.75 ""#).unwrap(), 0.75);
        assert!(matches!(parse(r#""high""#), Err(AnalysisError::Confidence(_))));
        assert!(matches!(parse(r#""NaN""#), Err(AnalysisError::Confidence(_))));
    }

    #[tokio::test]
    async fn request_uses_excerpt_and_classification_settings() {
        let svc = Arc::new(Scripted::failing());
        let text = "x".repeat(2500);
        classifier(svc.clone()).analyze(&text).await;

        let req = svc.request(0);
        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.temperature, 0.1);
        assert_eq!(req.max_tokens, 1000);
        assert!(req.system_prompt.is_some());
        let sent = format!("{}...", "x".repeat(2000));
        assert!(req.user_prompt.contains(&sent));
        assert!(!req.user_prompt.contains(&"x".repeat(2001)));
    }

    #[tokio::test]
    async fn confidence_always_in_range() {
        for reply in [
            r#"{"confidence_score": 5}"#,
            r#"{"confidence_score": -3}"#,
            r#"{"confidence_score": "0.4"}"#,
            "garbage",
        ] {
            let svc = Arc::new(Scripted::new([reply]));
            let a = classifier(svc).analyze("t").await;
            assert!((0.0..=1.0).contains(&a.confidence_score), "{reply}");
        }
    }
}
