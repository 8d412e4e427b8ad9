use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;
use crate::{DigestError, Result};

/// One text completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion and return its text. Any failure is `CompletionFailed`.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Build a completion provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn CompletionProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => Err(DigestError::Configuration(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ))),
    }
}

pub(crate) fn http_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.llm.timeout_secs))
        .build()
        .map_err(|e| DigestError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) fn require_api_key(settings: &Settings, provider: &str, env_var: &str) -> Result<String> {
    let api_key = settings.llm.api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(DigestError::Configuration(format!(
            "{} API key is missing. Set llm.api_key in config, YTDIGEST_API_KEY or {}.",
            provider, env_var
        )));
    }
    Ok(api_key)
}

/// Use the configured endpoint, or `default` when it is empty.
pub(crate) fn endpoint_or(settings: &Settings, default: &str) -> String {
    let endpoint = settings.llm.endpoint.trim();
    if endpoint.is_empty() {
        default.to_string()
    } else {
        endpoint.trim_end_matches('/').to_string()
    }
}
