//! Chunk persistence behind a storage trait.
//!
//! The pipeline only needs batch insert and id-keyed lookup, so the
//! trait stays that narrow. An in-memory map backs tests and offline
//! runs; the Postgres store (behind the `postgres` feature) is the
//! production implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::chunk::TextChunk;
use crate::error::{QuizError, Result};

/// Persistence for text chunks.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Persist a batch of chunks. No chunk counts as persisted unless
    /// the whole batch succeeds.
    async fn insert_chunks(&self, chunks: &[TextChunk]) -> Result<()>;

    /// Fetch a chunk's text by id.
    async fn get_chunk(&self, id: Uuid) -> Result<Option<String>>;

    /// Remove a chunk by id. Removing an absent id is not an error.
    async fn delete_chunk(&self, id: Uuid) -> Result<()>;
}

/// In-memory store for tests and offline operation.
#[derive(Debug, Default)]
pub struct MemoryChunkStore {
    chunks: RwLock<HashMap<Uuid, String>>,
}

impl MemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        match self.chunks.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn clear(&self) {
        match self.chunks.write() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn insert_chunks(&self, chunks: &[TextChunk]) -> Result<()> {
        let mut guard = self
            .chunks
            .write()
            .map_err(|e| QuizError::Storage(e.to_string().into()))?;
        for chunk in chunks {
            guard.insert(chunk.id, chunk.chunk.clone());
        }
        Ok(())
    }

    async fn get_chunk(&self, id: Uuid) -> Result<Option<String>> {
        let guard = self
            .chunks
            .read()
            .map_err(|e| QuizError::Storage(e.to_string().into()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn delete_chunk(&self, id: Uuid) -> Result<()> {
        let mut guard = self
            .chunks
            .write()
            .map_err(|e| QuizError::Storage(e.to_string().into()))?;
        guard.remove(&id);
        Ok(())
    }
}

#[cfg(feature = "postgres")]
pub use postgres::PostgresChunkStore;

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use sqlx::PgPool;

    /// Postgres-backed chunk store.
    #[derive(Debug, Clone)]
    pub struct PostgresChunkStore {
        pool: PgPool,
    }

    impl PostgresChunkStore {
        pub fn from_pool(pool: PgPool) -> Self {
            Self { pool }
        }

        /// Create the backing table if it does not exist yet.
        pub async fn ensure_schema(&self) -> Result<()> {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS textchunks (
                    id UUID PRIMARY KEY,
                    chunk TEXT NOT NULL
                )
                "#,
            )
            .execute(&self.pool)
            .await
            .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            Ok(())
        }
    }

    #[async_trait]
    impl ChunkStore for PostgresChunkStore {
        async fn insert_chunks(&self, chunks: &[TextChunk]) -> Result<()> {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            for chunk in chunks {
                sqlx::query("INSERT INTO textchunks (id, chunk) VALUES ($1, $2)")
                    .bind(chunk.id)
                    .bind(&chunk.chunk)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            }
            tx.commit()
                .await
                .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            Ok(())
        }

        async fn get_chunk(&self, id: Uuid) -> Result<Option<String>> {
            let row: Option<(String,)> =
                sqlx::query_as("SELECT chunk FROM textchunks WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            Ok(row.map(|(chunk,)| chunk))
        }

        async fn delete_chunk(&self, id: Uuid) -> Result<()> {
            sqlx::query("DELETE FROM textchunks WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| QuizError::Storage(e.to_string().into()))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryChunkStore::new();
        let chunk = TextChunk::new("some text");
        let id = chunk.id;

        store.insert_chunks(&[chunk]).await.unwrap();
        assert_eq!(store.count(), 1);
        assert_eq!(
            store.get_chunk(id).await.unwrap(),
            Some("some text".to_string())
        );
    }

    #[tokio::test]
    async fn test_memory_store_missing_chunk_is_none() {
        let store = MemoryChunkStore::new();
        assert_eq!(store.get_chunk(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_delete_is_idempotent() {
        let store = MemoryChunkStore::new();
        let chunk = TextChunk::new("text");
        let id = chunk.id;
        store.insert_chunks(&[chunk]).await.unwrap();

        store.delete_chunk(id).await.unwrap();
        assert_eq!(store.get_chunk(id).await.unwrap(), None);
        store.delete_chunk(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_batch_insert() {
        let store = MemoryChunkStore::new();
        let chunks: Vec<TextChunk> =
            (0..5).map(|i| TextChunk::new(format!("chunk {i}"))).collect();
        store.insert_chunks(&chunks).await.unwrap();
        assert_eq!(store.count(), 5);

        store.clear();
        assert_eq!(store.count(), 0);
    }
}
