//! Error types for chat provider clients.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Chat provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend could not be reached (connection failure, timeout,
    /// cancelled request)
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a non-success status
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend replied successfully but the reply field was absent
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
