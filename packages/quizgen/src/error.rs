//! Typed errors for the quiz generation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use llm_client::ProviderError;

/// Result type alias for quiz generation operations.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors that can occur during quiz generation.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Locale outside the supported set
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Chat provider call failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Model reply could not be decoded into a valid question shape
    #[error("failed to parse model reply: {reason}")]
    ParseFailure {
        reason: String,
        /// The offending payload text, for diagnostics
        raw: String,
    },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
