//! Google Gemini provider implementation.
//!
//! Uses `generateContent` with a JSON response schema so the model answers
//! with a machine-readable script description.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use wechat2word_core::{
    provider::{GenerationRequest, GenerationResponse},
    ExporterError, ProviderConfig, Result, ScriptGenerator,
};

/// Default Gemini REST endpoint for model operations.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Google Gemini provider for script generation.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    config: ProviderConfig,
}

// Request structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
    role: String,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

// Response structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u32>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn first_text(&self) -> Option<String> {
        let parts = &self.candidates.as_ref()?.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiGenerator {
    /// Create a new Gemini provider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ExporterError::ConfigError("Gemini API key is empty".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| ExporterError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables.
    ///
    /// Reads `GOOGLE_API_KEY` (or `API_KEY`), optionally `GEMINI_MODEL` and
    /// `GEMINI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::from_env_with_model(model)
    }

    /// Like [`GeminiGenerator::from_env`] but with an explicit model.
    pub fn from_env_with_model(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| {
                ExporterError::ConfigError("GOOGLE_API_KEY or API_KEY must be set".to_string())
            })?;

        let mut config = ProviderConfig::new(api_key, model);
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            config = config.with_base_url(url);
        }
        Self::new(config)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!("{}/{}:generateContent", base, self.config.model)
    }
}

#[async_trait]
impl ScriptGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!("Requesting script from Gemini");

        let api_request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema,
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ExporterError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExporterError::ProviderError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ExporterError::ProviderError(e.to_string()))?;

        // A blocked or empty answer is a reply without a script, not a transport failure.
        let text = gemini_response.first_text().ok_or_else(|| {
            error!("Gemini returned no candidate text");
            ExporterError::InvalidScript("No content generated".to_string())
        })?;

        Ok(GenerationResponse {
            text,
            tokens_used: gemini_response
                .usage_metadata
                .and_then(|u| u.total_token_count),
        })
    }
}
