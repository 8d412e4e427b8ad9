//! Chunk-and-merge summarization pipeline

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::llm::prompts::{build_chunk_prompt, build_reduction_prompt, SYSTEM_PROMPT};
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::summarize::options::SummaryOptions;
use crate::text::{normalize, split_into_chunks, truncate_words, word_count, Chunk};
use crate::Result;

/// Final summary of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    /// Chunks summarized before the reduction
    pub chunk_count: usize,
}

/// Summarizes long text by summarizing overlapping chunks and merging the results.
pub struct Summarizer {
    provider: Arc<dyn CompletionProvider>,
    options: SummaryOptions,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn CompletionProvider>, options: SummaryOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Produce the final summary for `text`.
    ///
    /// Returns `Ok(None)` without calling the provider when there is nothing
    /// to summarize. Any failed completion aborts the whole run.
    pub async fn summarize(&self, text: Option<&str>) -> Result<Option<Summary>> {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            tracing::info!("Nothing to summarize");
            return Ok(None);
        };

        let chunks =
            split_into_chunks(text, self.options.chunk_size, self.options.overlap_fraction)?;
        if chunks.is_empty() {
            tracing::info!("Text is empty after normalization, nothing to summarize");
            return Ok(None);
        }

        tracing::info!(
            "Summarizing {} chunks with {} ({} at a time)",
            chunks.len(),
            self.provider.name(),
            self.options.concurrency.max(1)
        );

        let partials = self.summarize_chunks(&chunks).await?;
        let merged = self.merge(&partials);
        let text = self.reduce(&merged).await?;

        Ok(Some(Summary {
            text,
            chunk_count: chunks.len(),
        }))
    }

    /// Summarize each chunk; results keep chunk order whatever order they finish in.
    async fn summarize_chunks(&self, chunks: &[Chunk]) -> Result<Vec<String>> {
        let total = chunks.len();

        stream::iter(chunks.iter().enumerate())
            .map(|(i, chunk)| self.summarize_chunk(i + 1, total, chunk))
            .buffered(self.options.concurrency.max(1))
            .try_collect()
            .await
    }

    async fn summarize_chunk(&self, index: usize, total: usize, chunk: &Chunk) -> Result<String> {
        tracing::debug!(
            "Chunk {}/{} at offset {} ({} chars)",
            index,
            total,
            chunk.offset,
            chunk.text.chars().count()
        );

        let prompt = build_chunk_prompt(
            &self.options.language,
            self.options.detail.style(),
            self.options.detail.points_per_chunk(),
            index,
            total,
            &chunk.text,
        );

        self.complete(&prompt).await
    }

    /// Join partial summaries, normalize them and cut them to the merge budget.
    fn merge(&self, partials: &[String]) -> String {
        let merged = normalize(&partials.join("\n"));
        let words = word_count(&merged);

        if words > self.options.merge_words {
            tracing::warn!(
                "Merged summaries have {} words, truncating to {}",
                words,
                self.options.merge_words
            );
            truncate_words(&merged, self.options.merge_words)
        } else {
            merged
        }
    }

    async fn reduce(&self, merged: &str) -> Result<String> {
        tracing::info!("Merging partial summaries (max {} words)", self.options.max_words);

        let prompt = build_reduction_prompt(
            &self.options.language,
            self.options.detail.style(),
            self.options.max_words,
            merged,
        );

        Ok(self.complete(&prompt).await?.trim().to_string())
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.provider
            .complete(CompletionRequest {
                system: SYSTEM_PROMPT,
                prompt,
                model: &self.options.model,
                temperature: self.options.temperature,
                max_tokens: self.options.max_tokens,
            })
            .await
    }
}
