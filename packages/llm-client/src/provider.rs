//! The capability trait all chat backends implement, plus config-driven
//! construction of the closed set of provider variants.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::google::GoogleGenerativeProvider;
use crate::local::LocalChatProvider;
use crate::mock::MockProvider;
use crate::openai::OpenAICompatibleProvider;
use crate::types::{GenerationOptions, Turn};

/// A chat backend capable of producing one assistant reply for a
/// conversation.
///
/// Implementations perform a single bounded network call per invocation
/// and hold no mutable state after construction.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the conversation and return the assistant's raw reply text.
    async fn get_reply(&self, conversation: &[Turn]) -> Result<String>;
}

/// The supported backend kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Local Ollama-style inference server
    LocalChat,
    /// Hosted OpenAI-compatible chat-completions endpoint
    OpenAICompatible,
    /// Google Generative Language API
    GoogleGenerative,
    /// Canned reply, no network
    Mock,
}

impl ProviderKind {
    /// Parse a provider name as found in configuration.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ollama" | "local" => Ok(Self::LocalChat),
            "openai" => Ok(Self::OpenAICompatible),
            "google" => Ok(Self::GoogleGenerative),
            "mock" => Ok(Self::Mock),
            other => Err(ProviderError::Config(format!(
                "unknown provider: {other}"
            ))),
        }
    }
}

/// Settings injected into an adapter at construction.
///
/// Built once at startup; the resulting provider is immutable.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub options: GenerationOptions,
    pub mock_reply: Option<String>,
}

impl ProviderSettings {
    /// Default settings for a backend kind. Local inference gets a longer
    /// timeout budget than hosted APIs.
    pub fn for_kind(kind: ProviderKind) -> Self {
        let (base_url, model, timeout) = match kind {
            ProviderKind::LocalChat | ProviderKind::Mock => (
                "http://ollama:11434",
                "llama3.1:8b",
                Duration::from_secs(60),
            ),
            ProviderKind::OpenAICompatible => (
                "https://api.openai.com/v1",
                "jazzysnake01/llama-3-8b-quizgen-instruct",
                Duration::from_secs(30),
            ),
            ProviderKind::GoogleGenerative => (
                "https://generativelanguage.googleapis.com",
                "gemini-2.0-flash",
                Duration::from_secs(30),
            ),
        };

        Self {
            kind,
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: None,
            timeout,
            options: GenerationOptions::default(),
            mock_reply: None,
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the generation options.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the canned reply used by the mock variant.
    pub fn mock_reply(mut self, reply: impl Into<String>) -> Self {
        self.mock_reply = Some(reply.into());
        self
    }

    /// Construct the configured provider variant.
    pub fn build(self) -> Result<Arc<dyn ChatProvider>> {
        match self.kind {
            ProviderKind::LocalChat => Ok(Arc::new(LocalChatProvider::new(
                self.base_url,
                self.model,
                self.options,
                self.timeout,
            )?)),
            ProviderKind::OpenAICompatible => {
                Ok(Arc::new(OpenAICompatibleProvider::new(
                    self.base_url,
                    self.model,
                    self.api_key,
                    self.options,
                    self.timeout,
                )?))
            }
            ProviderKind::GoogleGenerative => {
                let api_key = self.api_key.ok_or_else(|| {
                    ProviderError::Config(
                        "API_KEY must be set for the google provider".into(),
                    )
                })?;
                Ok(Arc::new(GoogleGenerativeProvider::new(
                    self.base_url,
                    self.model,
                    api_key,
                    self.options,
                    self.timeout,
                )?))
            }
            ProviderKind::Mock => Ok(Arc::new(match self.mock_reply {
                Some(reply) => MockProvider::new(reply),
                None => MockProvider::default(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_names() {
        assert_eq!(ProviderKind::parse("ollama").unwrap(), ProviderKind::LocalChat);
        assert_eq!(ProviderKind::parse("OpenAI").unwrap(), ProviderKind::OpenAICompatible);
        assert_eq!(ProviderKind::parse("google").unwrap(), ProviderKind::GoogleGenerative);
        assert_eq!(ProviderKind::parse("mock").unwrap(), ProviderKind::Mock);
        assert!(ProviderKind::parse("anthropic").is_err());
    }

    #[test]
    fn test_default_timeouts() {
        let local = ProviderSettings::for_kind(ProviderKind::LocalChat);
        assert_eq!(local.timeout, Duration::from_secs(60));

        let hosted = ProviderSettings::for_kind(ProviderKind::OpenAICompatible);
        assert_eq!(hosted.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_google_requires_api_key() {
        let err = ProviderSettings::for_kind(ProviderKind::GoogleGenerative)
            .build()
            .err();
        assert!(matches!(err, Some(ProviderError::Config(_))));
    }
}
