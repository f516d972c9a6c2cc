//! Chat client for the Google Generative Language API.
//!
//! This backend speaks a different wire shape than the chat-completions
//! family: the leading system turn is lifted into a `system_instruction`
//! field, the remaining turns become `contents` records with the
//! `assistant` role renamed to `model`, and the reply text sits under
//! `candidates[0].content.parts[0].text`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::provider::ChatProvider;
use crate::types::{GenerationOptions, Role, Turn};

/// Safety categories disabled on every request so quiz content about
/// sensitive source material is not silently filtered.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Client for the Google Generative Language API (API key-based).
#[derive(Clone)]
pub struct GoogleGenerativeProvider {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    options: GenerationOptions,
}

impl GoogleGenerativeProvider {
    /// Create a new client for the given model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
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
            api_key: api_key.into().trim().to_string(),
            options,
        })
    }
}

/// Translate a normalized conversation into the Generative Language
/// request body.
fn build_request_body(conversation: &[Turn], options: GenerationOptions) -> serde_json::Value {
    let contents: Vec<serde_json::Value> = conversation
        .iter()
        .filter_map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "model",
                Role::System => return None,
            };
            Some(json!({
                "role": role,
                "parts": [{ "text": turn.content }]
            }))
        })
        .collect();

    let safety_settings: Vec<serde_json::Value> = SAFETY_CATEGORIES
        .iter()
        .map(|category| {
            json!({
                "category": category,
                "threshold": "BLOCK_NONE"
            })
        })
        .collect();

    let mut body = json!({
        "contents": contents,
        "generationConfig": {
            "temperature": options.temperature,
            "maxOutputTokens": options.max_new_tokens,
        },
        "safetySettings": safety_settings,
    });

    if let Some(system) = conversation.first().filter(|t| t.role == Role::System) {
        body["system_instruction"] = json!({
            "parts": [{ "text": system.content }]
        });
    }

    body
}

#[async_trait]
impl ChatProvider for GoogleGenerativeProvider {
    async fn get_reply(&self, conversation: &[Turn]) -> Result<String> {
        let start = std::time::Instant::now();

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = build_request_body(conversation, self.options);

        let response = self
            .http_client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Generative Language request failed");
                ProviderError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Generative Language API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let content = raw["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no candidate text in response".into())
            })?
            .to_string();

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Generative Language completion"
        );

        Ok(content)
    }
}
