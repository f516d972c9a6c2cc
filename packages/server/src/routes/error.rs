//! HTTP error mapping for the question-generation routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use llm_client::ProviderError;
use quizgen::QuizError;
use serde_json::json;
use tracing::{error, warn};

/// Wrapper turning pipeline failures into HTTP responses.
///
/// Every failure kind is matched explicitly so a new variant forces a
/// deliberate status choice here.
pub struct ApiError(pub QuizError);

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            QuizError::UnsupportedLocale(locale) => {
                warn!(locale = %locale, "unsupported locale");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("unsupported locale: {locale}"),
                )
            }
            QuizError::Provider(ProviderError::Config(msg)) => {
                error!(error = %msg, "provider misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "provider misconfigured".to_string(),
                )
            }
            QuizError::Provider(ProviderError::Unavailable(msg)) => {
                error!(error = %msg, "provider unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "language model backend unreachable".to_string(),
                )
            }
            QuizError::Provider(ProviderError::Api { status, message }) => {
                error!(status, error = %message, "provider returned an error");
                (
                    StatusCode::BAD_GATEWAY,
                    "language model backend returned an error".to_string(),
                )
            }
            QuizError::Provider(ProviderError::MalformedResponse(msg)) => {
                error!(error = %msg, "provider response missing expected fields");
                (
                    StatusCode::BAD_GATEWAY,
                    "language model backend sent a malformed response".to_string(),
                )
            }
            QuizError::ParseFailure { reason, raw } => {
                error!(reason = %reason, raw = %raw, "model reply failed validation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "generated question failed validation".to_string(),
                )
            }
            QuizError::Storage(err) => {
                error!(error = %err, "chunk storage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "chunk storage failed".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
