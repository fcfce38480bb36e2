use std::sync::{Arc, LazyLock};

use doc2latex_core::{Config, DocumentAnalysis, text};
use regex::Regex;
use tracing::{info, warn};

use crate::error::InferenceError;
use crate::inference::{GenerateRequest, Inference};
use crate::prompts::{SUGGEST_SYSTEM_PROMPT, build_suggest_prompt};

pub const DEFAULT_SUGGESTION: &str = "Document analysis completed. Manual review recommended.";
pub const MAX_SUGGESTIONS: usize = 7;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 800;

static RE_NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*(.+)$").expect("valid numbered item regex")
});

/// The list returned whenever nothing usable came back.
pub fn default_suggestions() -> Vec<String> {
    vec![DEFAULT_SUGGESTION.to_string()]
}

/// Improvement suggestions for a finished document. Never empty.
pub struct SuggestionGenerator {
    service: Arc<dyn Inference>,
    model: String,
    excerpt_chars: usize,
}

impl SuggestionGenerator {
    pub fn new(config: &Config, service: Arc<dyn Inference>) -> Self {
        Self {
            service,
            model: config.classification_model.clone(),
            excerpt_chars: config.suggestion_excerpt_chars,
        }
    }

    pub async fn suggest(&self, content: &str, analysis: &DocumentAnalysis) -> Vec<String> {
        match self.try_suggest(content, analysis).await {
            Ok(items) if !items.is_empty() => {
                info!(count = items.len(), "suggestions generated");
                items
            }
            Ok(_) => {
                warn!("no numbered suggestions in response, using default");
                default_suggestions()
            }
            Err(e) => {
                warn!(error = %e, "suggestion generation failed, using default");
                default_suggestions()
            }
        }
    }

    async fn try_suggest(
        &self,
        content: &str,
        analysis: &DocumentAnalysis,
    ) -> Result<Vec<String>, InferenceError> {
        let excerpt = text::excerpt(content, self.excerpt_chars);
        let request = GenerateRequest {
            model: self.model.clone(),
            system_prompt: Some(SUGGEST_SYSTEM_PROMPT.to_string()),
            user_prompt: build_suggest_prompt(excerpt, analysis),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let response = self.service.generate(&request).await?;
        Ok(parse_numbered(&response.text))
    }
}

/// Numbered-list items, trimmed, blank ones dropped, at most
/// [`MAX_SUGGESTIONS`].
pub fn parse_numbered(reply: &str) -> Vec<String> {
    RE_NUMBERED_ITEM
        .captures_iter(reply)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::fake::Scripted;

    fn generator(svc: Arc<Scripted>) -> SuggestionGenerator {
        SuggestionGenerator::new(&Config::default(), svc)
    }

    #[test]
    fn parses_numbered_lines() {
        let reply = "Suggestions:\n1. Add a file number\n2.Use formal register  \n\nClosing remarks";
        assert_eq!(
            parse_numbered(reply),
            vec!["Add a file number", "Use formal register"]
        );
    }

    #[test]
    fn decimals_in_prose_are_not_items() {
        assert!(parse_numbered("Margins should stay at 2.5cm on every page.").is_empty());
        assert_eq!(
            parse_numbered("Keep 1.5 spacing.\n  3. Indent quotes"),
            vec!["Indent quotes"]
        );
    }

    #[test]
    fn caps_at_seven() {
        let reply: String = (1..=10).map(|i| format!("{i}. item {i}\n")).collect();
        let items = parse_numbered(&reply);
        assert_eq!(items.len(), 7);
        assert_eq!(items[6], "item 7");
    }

    #[tokio::test]
    async fn service_failure_gives_single_default() {
        let out = generator(Arc::new(Scripted::failing()))
            .suggest("content", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, vec![DEFAULT_SUGGESTION.to_string()]);
    }

    #[tokio::test]
    async fn unnumbered_reply_gives_default() {
        let svc = Arc::new(Scripted::new(["Looks fine to me."]));
        let out = generator(svc)
            .suggest("content", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, default_suggestions());
    }

    #[tokio::test]
    async fn request_uses_bounded_excerpt() {
        let svc = Arc::new(Scripted::new(["1. Tighten the subject line"]));
        let content = "y".repeat(1500);
        let out = generator(svc.clone())
            .suggest(&content, &DocumentAnalysis::default())
            .await;
        assert_eq!(out, vec!["Tighten the subject line"]);

        let req = svc.request(0);
        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.max_tokens, 800);
        assert!(req.user_prompt.contains(&format!("{}...", "y".repeat(1000))));
        assert!(!req.user_prompt.contains(&"y".repeat(1001)));
    }
}
