//! Question-generation and ingestion pipelines.
//!
//! Thin orchestration over the pure pieces: detect the locale, build
//! the prompt, ask the provider, decode the reply. Each call is an
//! independent unit of work with no shared mutable state.

use std::sync::Arc;

use llm_client::ChatProvider;
use tracing::debug;

use crate::chunk::{ChunkSplitter, TextChunk};
use crate::error::Result;
use crate::locale;
use crate::parse;
use crate::prompt;
use crate::question::{GeneratedQuestion, QuestionType};
use crate::store::ChunkStore;

/// Generates typed quiz questions from source text.
#[derive(Clone)]
pub struct QuestionGenerator {
    provider: Arc<dyn ChatProvider>,
}

impl QuestionGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Generate one question of the requested shape from `source_text`.
    pub async fn generate(
        &self,
        source_text: &str,
        question_type: QuestionType,
    ) -> Result<GeneratedQuestion> {
        let locale = locale::detect(source_text);
        debug!(locale = %locale, ?question_type, "generating question");

        let conversation = prompt::format(source_text, question_type, locale)?;
        let reply = self.provider.get_reply(&conversation).await?;
        parse::parse_reply(&reply, question_type)
    }
}

/// Split `text` and persist the resulting chunks as one batch.
pub async fn ingest(
    splitter: &ChunkSplitter,
    store: &dyn ChunkStore,
    text: &str,
) -> Result<Vec<TextChunk>> {
    let chunks = splitter.split(text);
    if !chunks.is_empty() {
        store.insert_chunks(&chunks).await?;
    }
    debug!(count = chunks.len(), "ingested text chunks");
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client::MockProvider;

    use crate::question::{OptionLetter, TrueOrFalseQuestion};
    use crate::store::MemoryChunkStore;

    #[tokio::test]
    async fn test_generate_true_or_false_from_canned_reply() {
        let provider = Arc::new(MockProvider::new(
            r#"<output>{"question":"Water boils at 100C.","solution":true}</output>"#,
        ));
        let generator = QuestionGenerator::new(provider);

        let question = generator
            .generate("Water boils at 100 degrees.", QuestionType::TrueOrFalse)
            .await
            .unwrap();

        assert_eq!(
            question,
            GeneratedQuestion::TrueOrFalse(TrueOrFalseQuestion {
                question: "Water boils at 100C.".to_string(),
                correct_option: true,
            })
        );
    }

    #[tokio::test]
    async fn test_generate_single_choice_from_canned_reply() {
        let provider = Arc::new(MockProvider::new(
            r#"<output>{
                "question": "Q",
                "answers": ["w", "x", "y", "z"],
                "solution": "C"
            }</output>"#,
        ));
        let generator = QuestionGenerator::new(provider);

        let question = generator
            .generate("Some source text in English.", QuestionType::SingleChoice)
            .await
            .unwrap();

        match question {
            GeneratedQuestion::SingleChoice(q) => {
                assert_eq!(q.correct_option, OptionLetter::C);
                assert_eq!(q.options.len(), 4);
            }
            other => panic!("wrong shape: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_surfaces_parse_failure() {
        let provider = Arc::new(MockProvider::new("<output>garbage</output>"));
        let generator = QuestionGenerator::new(provider);

        let err = generator
            .generate("Some text.", QuestionType::TrueOrFalse)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::QuizError::ParseFailure { .. }));
    }

    #[tokio::test]
    async fn test_ingest_splits_and_persists() {
        let store = MemoryChunkStore::new();
        let splitter = ChunkSplitter {
            chunk_size: 100,
            overlap: 20,
            ..ChunkSplitter::default()
        };
        let text = "sentence one. sentence two. ".repeat(20);

        let chunks = ingest(&splitter, &store, &text).await.unwrap();
        assert!(chunks.len() > 1);
        assert_eq!(store.count(), chunks.len());

        let first = &chunks[0];
        assert_eq!(
            store.get_chunk(first.id).await.unwrap(),
            Some(first.chunk.clone())
        );
    }

    #[tokio::test]
    async fn test_ingest_empty_text_persists_nothing() {
        let store = MemoryChunkStore::new();
        let splitter = ChunkSplitter::default();

        let chunks = ingest(&splitter, &store, "").await.unwrap();
        assert!(chunks.is_empty());
        assert_eq!(store.count(), 0);
    }
}
