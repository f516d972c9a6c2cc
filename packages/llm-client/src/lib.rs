//! Chat-completion clients for local and hosted LLM backends.
//!
//! One capability trait, [`ChatProvider`], with a closed set of
//! implementations selected once at startup from configuration:
//! a local Ollama-style server, any OpenAI-compatible chat-completions
//! endpoint, the Google Generative Language API, and a canned-reply mock.
//! Each variant keeps its backend's wire-format translation isolated.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{ProviderKind, ProviderSettings, Turn};
//!
//! let provider = ProviderSettings::for_kind(ProviderKind::LocalChat)
//!     .base_url("http://localhost:11434")
//!     .model("llama3.1:8b")
//!     .build()?;
//!
//! let reply = provider
//!     .get_reply(&[
//!         Turn::system("You are a helpful assistant."),
//!         Turn::user("Hello!"),
//!     ])
//!     .await?;
//! ```

pub mod error;
pub mod google;
pub mod local;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod types;

pub use error::{ProviderError, Result};
pub use google::GoogleGenerativeProvider;
pub use local::LocalChatProvider;
pub use mock::MockProvider;
pub use openai::OpenAICompatibleProvider;
pub use provider::{ChatProvider, ProviderKind, ProviderSettings};
pub use types::{GenerationOptions, Role, Turn};
