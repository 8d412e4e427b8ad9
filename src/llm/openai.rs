use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{
    endpoint_or, http_client, require_api_key, CompletionProvider, CompletionRequest,
};
use crate::{DigestError, Result};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    organization: Option<String>,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = require_api_key(settings, "OpenAI", "OPENAI_API_KEY")?;

        let organization = Some(settings.llm.organization.trim())
            .filter(|org| !org.is_empty())
            .map(str::to_string);

        Ok(Self {
            http: http_client(settings)?,
            api_key,
            organization,
            endpoint: endpoint_or(settings, DEFAULT_OPENAI_ENDPOINT),
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = ChatCompletionRequest::from_request(&request);

        let mut builder = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DigestError::CompletionFailed(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DigestError::CompletionFailed(format!(
                "OpenAI returned {}: {}",
                status,
                detail.trim()
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|e| {
            DigestError::CompletionFailed(format!("Failed to parse OpenAI response: {}", e))
        })?;

        extract_message_text(&payload)
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}

fn extract_message_text(payload: &ChatCompletionResponse) -> Result<String> {
    payload
        .choices
        .iter()
        .filter_map(|choice| choice.message.content.as_deref())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            DigestError::CompletionFailed(
                "OpenAI response did not contain completion text".to_string(),
            )
        })
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_request(request: &CompletionRequest<'a>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !request.system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: request.system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.prompt,
        });

        Self {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
