use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// How much detail the summary keeps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Detailed,
}

impl DetailLevel {
    /// Bullet points requested for each chunk summary.
    pub fn points_per_chunk(&self) -> usize {
        match self {
            Self::Brief => 3,
            Self::Standard => 5,
            Self::Detailed => 8,
        }
    }

    /// Style directive added to every prompt.
    pub fn style(&self) -> &'static str {
        match self {
            Self::Brief => "Keep the answer short and concise; only the key points.",
            Self::Standard => "Cover the main points with enough context to follow them.",
            Self::Detailed => {
                "Be thorough: keep names, numbers, examples and the reasoning behind each point."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Standard => "standard",
            Self::Detailed => "detailed",
        }
    }
}

/// Everything one summarization run needs, resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    /// Language the summary is written in
    pub language: String,
    pub detail: DetailLevel,
    /// Word ceiling passed to the reduction prompt
    pub max_words: usize,
    /// Chunk size in characters
    pub chunk_size: usize,
    pub overlap_fraction: f64,
    /// Word ceiling for the merged partial summaries
    pub merge_words: usize,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Chunk completions in flight at once
    pub concurrency: usize,
}

impl SummaryOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            language: settings.summary.language.clone(),
            detail: settings.summary.detail,
            max_words: settings.summary.max_words,
            chunk_size: settings.chunk_size(),
            overlap_fraction: settings.summary.overlap_fraction,
            merge_words: settings.chunk_budget().merge_words(),
            model: settings.llm.model.clone(),
            temperature: settings.llm.temperature,
            max_tokens: settings.llm.max_tokens,
            concurrency: settings.summary.concurrency,
        }
    }
}
