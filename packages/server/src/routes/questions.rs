//! Question-generation endpoints.

use axum::extract::Extension;
use axum::Json;
use quizgen::{GeneratedQuestion, QuestionType};
use serde::Deserialize;

use crate::app::AppState;
use crate::routes::error::ApiError;

/// Request body shared by all generation endpoints.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    /// Source text the question is generated from.
    pub prompt: String,
}

async fn create_question(
    state: &AppState,
    prompt: &str,
    question_type: QuestionType,
) -> Result<Json<GeneratedQuestion>, ApiError> {
    let question = state.generator.generate(prompt, question_type).await?;
    Ok(Json(question))
}

pub async fn create_true_or_false(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<Json<GeneratedQuestion>, ApiError> {
    create_question(&state, &request.prompt, QuestionType::TrueOrFalse).await
}

pub async fn create_single_choice(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<Json<GeneratedQuestion>, ApiError> {
    create_question(&state, &request.prompt, QuestionType::SingleChoice).await
}

pub async fn create_multiple_choice(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<Json<GeneratedQuestion>, ApiError> {
    create_question(&state, &request.prompt, QuestionType::MultipleChoice).await
}
