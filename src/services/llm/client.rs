use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// Anything that can turn a prompt plus context into text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn is_available(&self) -> bool;
    async fn generate(&self, prompt: &str, context: &str) -> Result<String, LlmError>;
}

/// Client for a local llama.cpp server (`/completion` endpoint).
#[derive(Clone)]
pub struct LLMService {
    client: Client,
    base_url: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

impl LLMService {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Same service with a different sampling temperature (JQL wants ~0.1).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl GenerativeBackend for LLMService {
    fn is_available(&self) -> bool {
        !self.base_url.is_empty()
    }

    async fn generate(&self, prompt: &str, context: &str) -> Result<String, LlmError> {
        if !self.is_available() {
            return Err(LlmError::Unavailable);
        }

        let full_prompt = if context.trim().is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n{}", context.trim(), prompt)
        };

        let request_body = CompletionRequest {
            prompt: full_prompt,
            stream: false,
            n_predict: self.max_tokens,
            temperature: self.temperature,
            stop: vec!["Human:".to_string(), "User:".to_string()],
        };

        debug!("Requesting completion from {}", self.base_url);
        let response = self
            .client
            .post(format!("{}/completion", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::Status(response.status()));
        }

        let resp_json: CompletionResponse = response.json().await?;
        let text = resp_json.content.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::Empty);
        }
        Ok(text)
    }
}
