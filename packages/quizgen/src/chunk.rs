//! Recursive, overlap-preserving text splitting.
//!
//! Long source texts are cut into bounded chunks before storage.
//! Splitting prefers the coarsest separator still present (paragraph,
//! line, sentence, word) and only falls back to raw character slicing
//! when nothing finer is available. Adjacent chunks share an
//! overlapping region so local context survives the cut.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded, independently addressable piece of a longer source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: Uuid,
    pub chunk: String,
}

impl TextChunk {
    /// Wrap `chunk` with a freshly generated identifier.
    pub fn new(chunk: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            chunk: chunk.into(),
        }
    }
}

/// Splits text into chunks of at most `chunk_size` characters.
///
/// `overlap` must be smaller than `chunk_size`. Separators are tried
/// coarsest first; the empty string means character-level slicing.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    pub chunk_size: usize,
    pub overlap: usize,
    pub separators: Vec<String>,
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
            separators: ["\n\n", "\n", ". ", " ", ""]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ChunkSplitter {
    /// Split `text` into chunks.
    ///
    /// Empty input yields no chunks; input that already fits yields a
    /// single chunk with no overlap applied. Otherwise each chunk is a
    /// contiguous substring of the source and adjacent chunks share an
    /// overlap of up to `overlap` characters.
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        if text.is_empty() {
            return Vec::new();
        }
        if text.chars().count() <= self.chunk_size {
            return vec![TextChunk::new(text)];
        }

        // Pieces are cut to chunk_size minus overlap so that stitching
        // the previous piece's tail onto each one stays within budget.
        let budget = self.chunk_size.saturating_sub(self.overlap).max(1);
        let pieces = self.split_pieces(text, budget, 0);

        let mut chunks = Vec::with_capacity(pieces.len());
        let mut prev: Option<&str> = None;
        for piece in &pieces {
            let body = match prev {
                Some(p) => format!("{}{}", suffix_chars(p, self.overlap), piece),
                None => piece.clone(),
            };
            chunks.push(TextChunk::new(body));
            prev = Some(piece);
        }
        chunks
    }

    fn split_pieces(&self, text: &str, budget: usize, sep_index: usize) -> Vec<String> {
        if text.chars().count() <= budget {
            return vec![text.to_string()];
        }
        let sep = match self.separators.get(sep_index) {
            Some(s) if !s.is_empty() => s.as_str(),
            // Separator list exhausted or character-level marker reached.
            _ => return slice_chars(text, budget),
        };
        if !text.contains(sep) {
            return self.split_pieces(text, budget, sep_index + 1);
        }

        // Keep the separator attached so pieces concatenate back to the
        // source text exactly.
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;
        for part in text.split_inclusive(sep) {
            let part_len = part.chars().count();
            if part_len > budget {
                if !current.is_empty() {
                    pieces.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                pieces.extend(self.split_pieces(part, budget, sep_index + 1));
            } else if current_len + part_len > budget {
                pieces.push(std::mem::take(&mut current));
                current.push_str(part);
                current_len = part_len;
            } else {
                current.push_str(part);
                current_len += part_len;
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }
}

/// The last `count` characters of `text`, on a valid boundary.
fn suffix_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Fixed-size character slices, boundary safe.
fn slice_chars(text: &str, budget: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(budget)
        .map(|window| window.iter().collect())
        .collect()
}
