//! LLM module for ytdigest
//!
//! Completion providers (OpenAI-compatible and Gemini) and the prompts sent to them.

mod client;
mod gemini;
mod openai;
pub mod prompts;

pub use client::{build_provider, CompletionProvider, CompletionRequest};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
