//! OpenAI-compatible chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use doc2latex_core::Config;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::InferenceError;
use crate::inference::{GenerateRequest, GenerateResponse, Inference};

/// HTTP client for `POST {base_url}/chat/completions` with Bearer auth.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

impl OpenAiClient {
    /// `base_url` should be like `https://api.openai.com/v1` (a trailing
    /// slash is tolerated).
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build from configuration. Fails with [`InferenceError::Unavailable`]
    /// when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(InferenceError::Unavailable)?;
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn chat_request(request: &GenerateRequest) -> ChatRequest<'_> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system_prompt {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: &request.user_prompt,
    });
    ChatRequest {
        model: &request.model,
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

fn parse_response(body: &str) -> Result<GenerateResponse, InferenceError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(InferenceError::EmptyResponse)?;
    Ok(GenerateResponse {
        text,
        tokens_used: parsed.usage.map_or(0, |u| u.total_tokens),
    })
}

#[async_trait]
impl Inference for OpenAiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InferenceError> {
        let url = self.endpoint();
        debug!(
            url = %url,
            model = %request.model,
            prompt_chars = request.user_prompt.len(),
            "sending chat completion"
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request(request))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let response = parse_response(&body)?;
        info!(
            model = %request.model,
            tokens = response.tokens_used,
            chars = response.text.len(),
            "chat completion received"
        );
        Ok(response)
    }
}
