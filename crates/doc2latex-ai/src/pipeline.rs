//! One document, start to finish.
//!
//! normalize → classify → restructure → enhancement decision → (enhance)
//! → metadata → render → suggestions. Only empty input stops a conversion;
//! every service failure degrades to that stage's default.

use std::sync::Arc;

use doc2latex_core::metadata::{assemble_dated, today};
use doc2latex_core::{Config, DocumentAnalysis, Metadata, Overrides, text};
use doc2latex_tex::{offline, render, restructure};
use serde::Serialize;
use tracing::info;

use crate::classifier::Classifier;
use crate::enhancer::Enhancer;
use crate::error::ConvertError;
use crate::inference::Inference;
use crate::policy::{self, ComplexityIndicator};
use crate::suggestions::{SuggestionGenerator, default_suggestions};

/// Everything a conversion produces.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// Complete LaTeX document.
    pub latex: String,
    pub metadata: Metadata,
    pub suggestions: Vec<String>,
    pub analysis: DocumentAnalysis,
    /// Structured content before template rendering.
    #[serde(skip)]
    pub content: String,
    pub enhanced: bool,
    #[serde(skip)]
    pub indicators: Vec<ComplexityIndicator>,
}

pub struct Converter {
    classifier: Classifier,
    enhancer: Enhancer,
    suggestions: SuggestionGenerator,
    date: Option<String>,
}

impl Converter {
    pub fn new(config: &Config, service: Arc<dyn Inference>) -> Self {
        Self {
            classifier: Classifier::new(config, service.clone()),
            enhancer: Enhancer::new(config, service.clone()),
            suggestions: SuggestionGenerator::new(config, service),
            date: None,
        }
    }

    /// Stamp documents with a fixed date instead of today's.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Normalise and classify only.
    pub async fn analyze(&self, raw: &str) -> Result<DocumentAnalysis, ConvertError> {
        let text = text::normalize(raw)?;
        Ok(self.classifier.analyze(&text).await)
    }

    pub async fn convert(
        &self,
        raw: &str,
        overrides: &Overrides,
    ) -> Result<ConversionOutput, ConvertError> {
        let text = text::normalize(raw)?;
        info!(chars = text.chars().count(), "starting conversion");

        let mut analysis = self.classifier.analyze(&text).await;

        let restructured = restructure(&text, &analysis);
        let indicators = policy::indicators(&restructured, &analysis);
        let enhanced = !indicators.is_empty();
        let content = if enhanced {
            let fired: Vec<&str> = indicators.iter().map(|i| i.as_str()).collect();
            info!(indicators = ?fired, "rule-based output flagged, enhancing");
            self.enhancer.enhance(&restructured, &analysis).await
        } else {
            info!("rule-based output accepted");
            restructured
        };

        let date = self.date.clone().unwrap_or_else(today);
        let metadata = assemble_dated(&mut analysis, overrides, date);
        let latex = render(&metadata.template, &metadata, &content);
        let suggestions = self.suggestions.suggest(&content, &analysis).await;

        info!(
            document_type = %analysis.document_type,
            template = %metadata.template,
            enhanced,
            latex_chars = latex.len(),
            "conversion complete"
        );
        Ok(ConversionOutput {
            latex,
            metadata,
            suggestions,
            analysis,
            content,
            enhanced,
            indicators,
        })
    }

    /// Convert without any service calls.
    pub fn convert_offline(
        &self,
        raw: &str,
        overrides: &Overrides,
    ) -> Result<ConversionOutput, ConvertError> {
        let date = self.date.clone().unwrap_or_else(today);
        convert_offline_dated(raw, overrides, date)
    }
}

/// Deterministic conversion used when no service credentials exist.
pub fn convert_offline(raw: &str, overrides: &Overrides) -> Result<ConversionOutput, ConvertError> {
    convert_offline_dated(raw, overrides, today())
}

fn convert_offline_dated(
    raw: &str,
    overrides: &Overrides,
    date: String,
) -> Result<ConversionOutput, ConvertError> {
    let text = text::normalize(raw)?;
    let doc = offline::convert(&text, overrides, date);
    info!(chars = doc.latex.len(), "offline conversion complete");
    Ok(ConversionOutput {
        latex: doc.latex,
        metadata: doc.metadata,
        suggestions: default_suggestions(),
        analysis: doc.analysis,
        content: doc.body,
        enhanced: false,
        indicators: Vec::new(),
    })
}
