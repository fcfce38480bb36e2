use std::sync::Arc;

use doc2latex_core::{Config, DocumentAnalysis};
use tracing::{info, warn};

use crate::error::InferenceError;
use crate::inference::{GenerateRequest, Inference};
use crate::prompts::{ENHANCE_SYSTEM_PROMPT, build_enhance_prompt};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 2000;

/// Second service pass over rule-engine output.
pub struct Enhancer {
    service: Arc<dyn Inference>,
    model: String,
}

impl Enhancer {
    pub fn new(config: &Config, service: Arc<dyn Inference>) -> Self {
        Self {
            service,
            model: config.conversion_model.clone(),
        }
    }

    /// The service's rewrite of `restructured`, or `restructured` itself
    /// when the call fails or comes back blank.
    pub async fn enhance(&self, restructured: &str, analysis: &DocumentAnalysis) -> String {
        match self.try_enhance(restructured, analysis).await {
            Ok(text) => {
                info!(
                    input_chars = restructured.len(),
                    output_chars = text.len(),
                    "content enhanced"
                );
                text
            }
            Err(e) => {
                warn!(error = %e, "enhancement failed, keeping rule-based output");
                restructured.to_string()
            }
        }
    }

    async fn try_enhance(
        &self,
        restructured: &str,
        analysis: &DocumentAnalysis,
    ) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            system_prompt: Some(ENHANCE_SYSTEM_PROMPT.to_string()),
            user_prompt: build_enhance_prompt(restructured, analysis),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let response = self.service.generate(&request).await?;
        if response.text.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::fake::Scripted;

    fn enhancer(svc: Arc<Scripted>) -> Enhancer {
        Enhancer::new(&Config::default(), svc)
    }

    #[tokio::test]
    async fn returns_service_text_verbatim() {
        let svc = Arc::new(Scripted::new(["  \\section{Improved}\nBody  "]));
        let out = enhancer(svc.clone())
            .enhance("raw", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, "  \\section{Improved}\nBody  ");

        let req = svc.request(0);
        assert_eq!(req.model, "gpt-4");
        assert_eq!(req.temperature, 0.2);
        assert_eq!(req.max_tokens, 2000);
        assert!(req.user_prompt.contains("Original Text:\nraw\n"));
    }

    #[tokio::test]
    async fn failure_returns_input_unchanged() {
        let svc = Arc::new(Scripted::failing());
        let out = enhancer(svc)
            .enhance("rule output", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, "rule output");
    }

    #[tokio::test]
    async fn server_error_returns_input_unchanged() {
        let svc = Arc::new(Scripted::default());
        svc.push_error(InferenceError::Server {
            status: 429,
            body: "rate limited".into(),
        });
        let out = enhancer(svc.clone())
            .enhance("rule output", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, "rule output");
        assert_eq!(svc.calls(), 1);
    }

    #[tokio::test]
    async fn blank_reply_counts_as_failure() {
        let svc = Arc::new(Scripted::new(["  \n "]));
        let out = enhancer(svc)
            .enhance("rule output", &DocumentAnalysis::default())
            .await;
        assert_eq!(out, "rule output");
    }
}
