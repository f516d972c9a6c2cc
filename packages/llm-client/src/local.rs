//! Chat client for a local Ollama-style inference server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::provider::ChatProvider;
use crate::types::{GenerationOptions, Turn};

/// Client for a local inference server speaking the Ollama chat API.
#[derive(Clone)]
pub struct LocalChatProvider {
    http_client: Client,
    base_url: String,
    model: String,
    options: GenerationOptions,
}

impl LocalChatProvider {
    /// Create a new client for the given server and model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            model: model.into(),
            options,
        })
    }
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
    temperature: f32,
    max_new_tokens: u32,
}

/// Raw chat response from the server (for internal parsing).
#[derive(Deserialize)]
struct ChatResponseRaw {
    message: Option<ChatMessageRaw>,
}

#[derive(Deserialize)]
struct ChatMessageRaw {
    content: String,
}

#[async_trait]
impl ChatProvider for LocalChatProvider {
    async fn get_reply(&self, conversation: &[Turn]) -> Result<String> {
        let start = std::time::Instant::now();

        let body = ChatBody {
            model: &self.model,
            messages: conversation,
            stream: false,
            temperature: self.options.temperature,
            max_new_tokens: self.options.max_new_tokens,
        };

        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Local chat request failed");
                ProviderError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Local chat API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let content = raw
            .message
            .map(|m| m.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no message in response".into())
            })?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Local chat completion"
        );

        Ok(content)
    }
}
