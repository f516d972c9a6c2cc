//! Canned-reply provider for offline operation and tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::provider::ChatProvider;
use crate::types::Turn;

/// A provider that returns a canned reply without touching the network.
///
/// Selected by configuration for offline operation; every other
/// component's contract is unchanged.
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: String,
}

impl MockProvider {
    /// Create a mock provider with the given canned reply.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(
            r#"<output>{"question":"The capital of France is Paris.","solution":true}</output>"#,
        )
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn get_reply(&self, _conversation: &[Turn]) -> Result<String> {
        Ok(self.reply.clone())
    }
}
