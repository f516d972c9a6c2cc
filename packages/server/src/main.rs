// Main entry point for the quiz generation API server

use std::sync::Arc;

use anyhow::{Context, Result};
use quizgen::{
    ChunkSplitter, ChunkStore, MemoryChunkStore, PostgresChunkStore,
    QuestionGenerator,
};
use server_core::{build_app, AppState, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                |_| "info,server_core=debug,quizgen=debug,llm_client=debug,sqlx=warn".into(),
            ),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quiz generation API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(provider = %config.provider, "Configuration loaded");

    let provider = config
        .build_provider()
        .context("Failed to build chat provider")?;
    let generator = QuestionGenerator::new(provider);

    // Connect chunk storage: Postgres when configured, memory otherwise
    let (store, db_pool): (Arc<dyn ChunkStore>, Option<PgPool>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(database_url)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Database connected");

                let store = PostgresChunkStore::from_pool(pool.clone());
                store
                    .ensure_schema()
                    .await
                    .context("Failed to create chunk storage schema")?;
                tracing::info!("Chunk storage schema ready");

                (Arc::new(store), Some(pool))
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set, storing chunks in memory only"
                );
                (Arc::new(MemoryChunkStore::new()), None)
            }
        };

    // Build application
    let app = build_app(AppState {
        generator,
        splitter: Arc::new(ChunkSplitter::default()),
        store,
        db_pool,
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
