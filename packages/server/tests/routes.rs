//! Route-level tests against the assembled router with a canned
//! provider and the in-memory chunk store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use llm_client::{ChatProvider, MockProvider, ProviderError, Turn};
use quizgen::{ChunkSplitter, MemoryChunkStore, QuestionGenerator};
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::{build_app, AppState};

fn app_with_reply(reply: &str) -> (Router, Arc<MemoryChunkStore>) {
    app_with_provider(Arc::new(MockProvider::new(reply)))
}

fn app_with_provider(
    provider: Arc<dyn ChatProvider>,
) -> (Router, Arc<MemoryChunkStore>) {
    let store = Arc::new(MemoryChunkStore::new());
    let app = build_app(AppState {
        generator: QuestionGenerator::new(provider),
        splitter: Arc::new(ChunkSplitter {
            chunk_size: 100,
            overlap: 20,
            ..ChunkSplitter::default()
        }),
        store: store.clone(),
        db_pool: None,
    });
    (app, store)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn true_or_false_route_returns_question() {
    let (app, _) = app_with_reply(
        r#"<output>{"question":"Water boils at 100C.","solution":true}</output>"#,
    );

    let (status, body) = post_json(
        app,
        "/true-or-false/create",
        json!({ "prompt": "Water boils at 100 degrees Celsius." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "question": "Water boils at 100C.", "correctOption": true })
    );
}

#[tokio::test]
async fn single_choice_route_returns_options_and_letter() {
    let (app, _) = app_with_reply(
        r#"<output>{"question":"Q","answers":["w","x","y","z"],"solution":"B"}</output>"#,
    );

    let (status, body) = post_json(
        app,
        "/single-choice/create",
        json!({ "prompt": "Some source text about a topic." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "question": "Q",
            "options": ["w", "x", "y", "z"],
            "correctOption": "B"
        })
    );
}

#[tokio::test]
async fn multiple_choice_route_returns_letter_set() {
    let (app, _) = app_with_reply(
        r#"<output>{"question":"Q","answers":["w","x","y","z"],"solution":["A","C"]}</output>"#,
    );

    let (status, body) = post_json(
        app,
        "/multiple-choice/create",
        json!({ "prompt": "Some source text about a topic." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correctOptions"], json!(["A", "C"]));
    assert_eq!(body["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn chunk_route_persists_and_returns_chunks() {
    let (app, store) = app_with_reply("unused");
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);

    let (status, body) = post_json(app, "/chunk", json!({ "prompt": text })).await;

    assert_eq!(status, StatusCode::OK);
    let chunks = body.as_array().unwrap();
    assert!(chunks.len() > 1);
    assert_eq!(store.count(), chunks.len());
    for chunk in chunks {
        assert!(chunk["id"].is_string());
        assert!(chunk["chunk"].is_string());
    }
}

#[tokio::test]
async fn invalid_model_reply_is_a_server_error() {
    let (app, _) = app_with_reply("<output>not json</output>");

    let (status, body) = post_json(
        app,
        "/true-or-false/create",
        json!({ "prompt": "Some text." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unreachable_provider_is_a_bad_gateway() {
    struct DownProvider;

    #[async_trait::async_trait]
    impl ChatProvider for DownProvider {
        async fn get_reply(&self, _conversation: &[Turn]) -> llm_client::Result<String> {
            Err(ProviderError::Unavailable("connection refused".to_string()))
        }
    }

    let (app, _) = app_with_provider(Arc::new(DownProvider));

    let (status, body) = post_json(
        app,
        "/single-choice/create",
        json!({ "prompt": "Some text." }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_reports_memory_store() {
    let (app, _) = app_with_reply("unused");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "memory");
}
