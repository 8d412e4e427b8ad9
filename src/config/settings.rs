//! Application settings management

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::summarize::DetailLevel;
use crate::text::{ChunkBudget, DEFAULT_OVERLAP_FRACTION};
use crate::{DigestError, Result, APP_NAME};

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Completion provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Transcript source settings
    #[serde(default)]
    pub transcript: TranscriptSettings,

    /// Summarization settings
    #[serde(default)]
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Completion provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Organization id sent to OpenAI-compatible endpoints
    #[serde(default)]
    pub organization: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (for self-hosted or compatible providers)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token limit for each completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Input budget of one completion call, counted in words
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Caption languages to try, in order of preference
    #[serde(default = "default_transcript_languages")]
    pub languages: Vec<String>,

    /// Separator placed between caption segments
    #[serde(default = "default_separator")]
    pub separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySettings {
    /// Language the summary is written in
    #[serde(default = "default_summary_language")]
    pub language: String,

    /// Level of detail (brief, standard, detailed)
    #[serde(default)]
    pub detail: DetailLevel,

    /// Word ceiling for the final summary
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Fraction of each chunk repeated at the start of the next one
    #[serde(default = "default_overlap_fraction")]
    pub overlap_fraction: f64,

    /// Chunk size in characters (derived from llm.max_input_tokens when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,

    /// Chunk summaries requested at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

// Default value functions

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    512
}

/// Upper bound accepted for `llm.max_input_tokens`
pub const MAX_INPUT_TOKENS_LIMIT: usize = 2_000_000;

fn default_max_input_tokens() -> usize {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_transcript_languages() -> Vec<String> {
    vec!["en".to_string(), "de".to_string()]
}

fn default_separator() -> String {
    "-".to_string()
}

fn default_summary_language() -> String {
    "English".to_string()
}

fn default_max_words() -> usize {
    250
}

fn default_overlap_fraction() -> f64 {
    DEFAULT_OVERLAP_FRACTION
}

fn default_concurrency() -> usize {
    1
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            organization: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_input_tokens: default_max_input_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: default_transcript_languages(),
            separator: default_separator(),
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            language: default_summary_language(),
            detail: DetailLevel::default(),
            max_words: default_max_words(),
            overlap_fraction: default_overlap_fraction(),
            chunk_size: None,
            concurrency: default_concurrency(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default configuration file.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(DigestError::Configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => Self::config_path()?,
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path).map_err(|e| {
                DigestError::Configuration(format!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            toml::from_str(&content).map_err(|e| {
                DigestError::Configuration(format!(
                    "Failed to parse config file {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            tracing::info!("No config file found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides();
        settings.validate()?;

        Ok(settings)
    }

    /// Parse settings from TOML text without touching the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DigestError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            let provider_var = match self.llm.provider.to_lowercase().as_str() {
                "gemini" => "GEMINI_API_KEY",
                _ => "OPENAI_API_KEY",
            };
            for var in ["YTDIGEST_API_KEY", provider_var] {
                if let Ok(key) = std::env::var(var) {
                    if !key.trim().is_empty() {
                        self.llm.api_key = key;
                        break;
                    }
                }
            }
        }

        if self.llm.organization.trim().is_empty() {
            if let Ok(org) = std::env::var("OPENAI_ORGANIZATION") {
                self.llm.organization = org;
            }
        }
    }

    /// Reject values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(DigestError::Configuration(msg)) };

        let overlap = self.summary.overlap_fraction;
        if !overlap.is_finite() || !(0.0..1.0).contains(&overlap) {
            return fail(format!(
                "summary.overlap_fraction must be in [0, 1), got {}",
                overlap
            ));
        }
        if self.summary.chunk_size == Some(0) {
            return fail("summary.chunk_size must be greater than zero".to_string());
        }
        if self.summary.max_words == 0 {
            return fail("summary.max_words must be greater than zero".to_string());
        }
        if self.summary.concurrency == 0 {
            return fail("summary.concurrency must be at least 1".to_string());
        }
        if self.llm.max_input_tokens == 0 {
            return fail("llm.max_input_tokens must be greater than zero".to_string());
        }
        if self.llm.max_input_tokens > MAX_INPUT_TOKENS_LIMIT {
            return fail(format!(
                "llm.max_input_tokens must be at most {}, got {}",
                MAX_INPUT_TOKENS_LIMIT, self.llm.max_input_tokens
            ));
        }
        if self.llm.max_tokens == 0 {
            return fail("llm.max_tokens must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return fail(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            ));
        }
        if self.llm.timeout_secs == 0 {
            return fail("llm.timeout_secs must be greater than zero".to_string());
        }
        if self.transcript.languages.iter().all(|l| l.trim().is_empty()) {
            return fail("transcript.languages must name at least one language".to_string());
        }

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME).ok_or_else(|| {
            DigestError::Configuration("Could not determine config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)
            .map_err(|e| DigestError::Configuration(format!("Failed to render config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Chunk size in characters, derived from the input budget unless set explicitly.
    pub fn chunk_size(&self) -> usize {
        self.summary
            .chunk_size
            .unwrap_or_else(|| self.chunk_budget().chunk_chars())
    }

    pub fn chunk_budget(&self) -> ChunkBudget {
        ChunkBudget::new(self.llm.max_input_tokens)
    }
}
