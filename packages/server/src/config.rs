use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use llm_client::{ChatProvider, ProviderKind, ProviderSettings};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider name: "ollama", "openai", "google" or "mock"
    pub provider: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Canned reply used when the mock provider is selected
    pub mock_reply: Option<String>,
    /// Chunks are kept in memory when unset
    pub database_url: Option<String>,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            provider: env::var("PROVIDER").unwrap_or_else(|_| "ollama".to_string()),
            model: env::var("MODEL").ok(),
            base_url: env::var("BASE_URL").ok(),
            api_key: env::var("API_KEY").ok(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .map(|v| {
                    v.parse()
                        .context("REQUEST_TIMEOUT_SECS must be a valid number")
                })
                .transpose()?,
            mock_reply: env::var("MOCK_REPLY").ok(),
            database_url: env::var("DATABASE_URL").ok(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }

    /// Build the chat provider this configuration selects.
    pub fn build_provider(&self) -> Result<Arc<dyn ChatProvider>> {
        let kind = ProviderKind::parse(&self.provider)
            .context("PROVIDER must name a known provider")?;

        let mut settings = ProviderSettings::for_kind(kind);
        if let Some(model) = &self.model {
            settings = settings.model(model);
        }
        if let Some(base_url) = &self.base_url {
            settings = settings.base_url(base_url);
        }
        if let Some(api_key) = &self.api_key {
            settings = settings.api_key(api_key);
        }
        if let Some(secs) = self.request_timeout_secs {
            settings = settings.timeout(Duration::from_secs(secs));
        }
        if let Some(reply) = &self.mock_reply {
            settings = settings.mock_reply(reply);
        }

        settings
            .build()
            .context("failed to construct the configured provider")
    }
}
