//! Configuration module for ytdigest
//!
//! Handles loading and validating application settings from TOML files.

mod settings;

pub use settings::{LlmSettings, Settings, SummarySettings, TranscriptSettings};
