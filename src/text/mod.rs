//! Text handling for ytdigest
//!
//! Normalization, word-based budgeting and overlapping chunking of transcript text.

mod chunk;
mod normalize;

pub use chunk::{split_into_chunks, Chunk, ChunkBudget, DEFAULT_OVERLAP_FRACTION};
pub use normalize::{normalize, truncate_words, word_count};
