//! Summarization module for ytdigest
//!
//! Chunk-and-merge summarization of long transcripts.

mod options;
mod pipeline;

pub use options::{DetailLevel, SummaryOptions};
pub use pipeline::{Summarizer, Summary};
