//! Completion service client
//!
//! Wraps the OpenAI-compatible chat completions endpoint exposed by Groq.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::LlmConfig;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Missing completion service credential")]
    MissingCredential,

    #[error("{0}")]
    Upstream(String),
}

/// Prompt sent to the completion service
#[derive(Debug, Clone)]
pub struct CompletionPrompt {
    pub system: String,
    pub user: String,
}

/// A text completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the raw text of the first completion choice
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError>;

    /// Model identifier used for completions
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// Response models - only the fields we need
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the Groq chat completions API
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl GroqClient {
    /// Create a client from the completion settings.
    ///
    /// A missing credential is not an error here; it is reported by
    /// [`CompletionClient::complete`] so the service can still start.
    pub fn new(config: &LlmConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    fn transport_error(&self, err: reqwest::Error, context: &str) -> CompletionError {
        if err.is_timeout() {
            return CompletionError::Upstream(format!(
                "Completion request timed out after {}s",
                self.timeout_secs
            ));
        }
        CompletionError::Upstream(format!("{}: {}", context, err))
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredential)?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            url = %url,
            prompt_length = prompt.user.len(),
            "Initiating completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, "Completion request failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                model = %self.model,
                status = status.as_u16(),
                elapsed_ms = start_time.elapsed().as_millis(),
                "Completion service returned an error status"
            );
            return Err(CompletionError::Upstream(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e, "Failed to deserialize completion"))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::Upstream("Completion contained no message content".to_string())
            })?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            response_length = content.len(),
            "Completion request finished"
        );

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
