//! Overlapping chunking of normalized text

use crate::text::normalize::normalize;
use crate::{DigestError, Result};

/// Overlap used between consecutive chunks unless configured otherwise.
pub const DEFAULT_OVERLAP_FRACTION: f64 = 0.5;

/// A window of normalized text submitted as one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Character index of the first character within the normalized text
    pub offset: usize,
    pub text: String,
}

/// Split `text` into windows of `chunk_size` characters that advance by
/// `chunk_size - floor(chunk_size * overlap_fraction)`.
///
/// The text is normalized first. Sizes are counted in characters so a
/// window never ends inside a multi-byte code point.
pub fn split_into_chunks(
    text: &str,
    chunk_size: usize,
    overlap_fraction: f64,
) -> Result<Vec<Chunk>> {
    let stride = stride_for(chunk_size, overlap_fraction)?;
    let normalized = normalize(text);

    // Byte offset of every char, plus the end, so windows slice on boundaries.
    let mut boundaries: Vec<usize> = normalized.char_indices().map(|(i, _)| i).collect();
    let len = boundaries.len();
    boundaries.push(normalized.len());

    let mut chunks = Vec::with_capacity(len.div_ceil(stride));
    let mut start = 0;
    while start < len {
        let end = (start + chunk_size).min(len);
        chunks.push(Chunk {
            offset: start,
            text: normalized[boundaries[start]..boundaries[end]].to_string(),
        });
        start += stride;
    }

    tracing::debug!(
        "Split {} chars into {} chunks (size {}, stride {})",
        len,
        chunks.len(),
        chunk_size,
        stride
    );

    Ok(chunks)
}

fn stride_for(chunk_size: usize, overlap_fraction: f64) -> Result<usize> {
    if chunk_size == 0 {
        return Err(DigestError::Configuration(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if !overlap_fraction.is_finite() || !(0.0..1.0).contains(&overlap_fraction) {
        return Err(DigestError::Configuration(format!(
            "overlap fraction must be in [0, 1), got {}",
            overlap_fraction
        )));
    }

    let overlap_chars = (chunk_size as f64 * overlap_fraction).floor() as usize;
    match chunk_size.checked_sub(overlap_chars) {
        Some(stride) if stride >= 1 => Ok(stride),
        _ => Err(DigestError::Configuration(format!(
            "chunk size {} with overlap {} leaves no stride",
            chunk_size, overlap_fraction
        ))),
    }
}

/// Converts the completion capability's input budget into chunk and merge sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    /// Input budget of one completion call, in words
    pub max_input_tokens: usize,
}

impl ChunkBudget {
    /// Words kept free for the instructions wrapped around each chunk
    pub const PROMPT_RESERVE_WORDS: usize = 200;
    /// Average characters per word, including the separating space
    pub const CHARS_PER_WORD: usize = 6;
    pub const MIN_CHUNK_CHARS: usize = 200;

    pub fn new(max_input_tokens: usize) -> Self {
        Self { max_input_tokens }
    }

    /// Words available for text once the prompt reserve is taken out.
    pub fn content_words(&self) -> usize {
        self.max_input_tokens
            .saturating_sub(Self::PROMPT_RESERVE_WORDS)
            .max(1)
    }

    /// Chunk size in characters for one per-chunk completion.
    pub fn chunk_chars(&self) -> usize {
        self.content_words()
            .saturating_mul(Self::CHARS_PER_WORD)
            .max(Self::MIN_CHUNK_CHARS)
    }

    /// Word ceiling applied to the merged partial summaries.
    pub fn merge_words(&self) -> usize {
        self.content_words()
    }
}
