//! Seam to the external text-understanding service.

use async_trait::async_trait;

use crate::error::InferenceError;

/// One prompt/response exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    pub tokens_used: u32,
}

#[async_trait]
pub trait Inference: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InferenceError>;
}
