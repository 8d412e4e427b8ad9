use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{
    endpoint_or, http_client, require_api_key, CompletionProvider, CompletionRequest,
};
use crate::{DigestError, Result};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = require_api_key(settings, "Gemini", "GEMINI_API_KEY")?;

        Ok(Self {
            http: http_client(settings)?,
            api_key,
            endpoint: endpoint_or(settings, DEFAULT_GEMINI_ENDPOINT),
        })
    }

    fn request_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = GeminiGenerateContentRequest::from_request(&request);

        let response = self
            .http
            .post(self.request_url(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DigestError::CompletionFailed(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DigestError::CompletionFailed(format!(
                "Gemini returned {}: {}",
                status,
                detail.trim()
            )));
        }

        let payload: GeminiGenerateContentResponse = response.json().await.map_err(|e| {
            DigestError::CompletionFailed(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_candidate_text(&payload)
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}

fn extract_candidate_text(payload: &GeminiGenerateContentResponse) -> Result<String> {
    payload
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            DigestError::CompletionFailed("Gemini response did not contain text".to_string())
        })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

impl GeminiGenerateContentRequest {
    fn from_request(request: &CompletionRequest<'_>) -> Self {
        let system_instruction = (!request.system.is_empty()).then(|| GeminiContent {
            parts: vec![GeminiPart {
                text: request.system.to_string(),
            }],
        });

        Self {
            system_instruction,
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
