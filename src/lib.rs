//! ytdigest - Fetch a video transcript and condense it into an AI-powered summary
//!
//! Long transcripts are split into overlapping chunks, each chunk is summarized
//! on its own, and the partial summaries are merged by one final reduction pass.

pub mod cli;
pub mod config;
pub mod llm;
pub mod output;
pub mod summarize;
pub mod text;
pub mod transcript;

use thiserror::Error;

/// Main error type for ytdigest
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transcript unavailable for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ytdigest";
