//! Text ingestion endpoint: split the posted text and persist the
//! resulting chunks.

use axum::extract::Extension;
use axum::Json;
use quizgen::TextChunk;
use serde::Deserialize;

use crate::app::AppState;
use crate::routes::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateChunksRequest {
    /// Source text to split and store.
    pub prompt: String,
}

pub async fn create_chunks(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateChunksRequest>,
) -> Result<Json<Vec<TextChunk>>, ApiError> {
    let chunks =
        quizgen::ingest(&state.splitter, state.store.as_ref(), &request.prompt)
            .await?;
    Ok(Json(chunks))
}
