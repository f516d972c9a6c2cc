//! Quiz question generation from source text.
//!
//! The pipeline: detect the source text's locale, build a prompt from
//! the locale and question-type keyed catalogue, send it through a
//! [`llm_client::ChatProvider`], and strictly decode the reply into a
//! typed question shape. Long texts can also be split into overlapping
//! chunks and persisted through a [`ChunkStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use llm_client::MockProvider;
//! use quizgen::{QuestionGenerator, QuestionType};
//!
//! let generator = QuestionGenerator::new(Arc::new(MockProvider::default()));
//! let question = generator
//!     .generate("The capital of France is Paris.", QuestionType::TrueOrFalse)
//!     .await?;
//! ```

pub mod chunk;
pub mod error;
pub mod generator;
pub mod locale;
pub mod parse;
pub mod prompt;
pub mod question;
pub mod store;

pub use chunk::{ChunkSplitter, TextChunk};
pub use error::{QuizError, Result};
pub use generator::{ingest, QuestionGenerator};
pub use locale::{detect, Locale};
pub use parse::parse_reply;
pub use prompt::format;
pub use question::{
    GeneratedQuestion, MultipleChoiceQuestion, OptionLetter, QuestionType,
    SingleChoiceQuestion, TrueOrFalseQuestion,
};
pub use store::{ChunkStore, MemoryChunkStore};

#[cfg(feature = "postgres")]
pub use store::PostgresChunkStore;
