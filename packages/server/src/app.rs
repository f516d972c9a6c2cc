//! Application setup and router construction.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use quizgen::{ChunkSplitter, ChunkStore, QuestionGenerator};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{
    create_chunks, create_multiple_choice, create_single_choice,
    create_true_or_false, health_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: QuestionGenerator,
    pub splitter: Arc<ChunkSplitter>,
    pub store: Arc<dyn ChunkStore>,
    /// Present only when chunks are persisted to Postgres.
    pub db_pool: Option<PgPool>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/multiple-choice/create", post(create_multiple_choice))
        .route("/single-choice/create", post(create_single_choice))
        .route("/true-or-false/create", post(create_true_or_false))
        .route("/chunk", post(create_chunks))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
