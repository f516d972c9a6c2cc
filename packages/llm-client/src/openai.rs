//! Chat client for hosted OpenAI-compatible chat-completions endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::provider::ChatProvider;
use crate::types::{GenerationOptions, Turn};

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
#[derive(Clone)]
pub struct OpenAICompatibleProvider {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    options: GenerationOptions,
}

impl OpenAICompatibleProvider {
    /// Create a new client. The API key is optional so the same client
    /// can talk to unauthenticated self-hosted endpoints.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
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
            api_key,
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

/// Raw chat response from the API (for internal parsing).
#[derive(Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageRaw,
}

#[derive(Deserialize)]
struct ChatMessageRaw {
    content: String,
}

#[async_trait]
impl ChatProvider for OpenAICompatibleProvider {
    async fn get_reply(&self, conversation: &[Turn]) -> Result<String> {
        let start = std::time::Instant::now();

        let body = ChatBody {
            model: &self.model,
            messages: conversation,
            stream: false,
            temperature: self.options.temperature,
            max_new_tokens: self.options.max_new_tokens,
        };

        let mut request = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Chat completion request failed");
            ProviderError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Chat completion API error");
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
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no choices in response".into())
            })?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        Ok(content)
    }
}
