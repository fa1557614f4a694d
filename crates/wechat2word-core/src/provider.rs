//! Generative service trait and configuration.
//!
//! Defines the interface that AI backends must implement.

use crate::{ExporterError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration for a generative service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Model identifier (e.g., "gemini-3-pro-preview").
    pub model: String,

    /// Base URL for the API.
    pub base_url: Option<String>,

    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Request timeout in seconds. `None` waits for as long as the service takes.
    pub timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    /// Create a new provider config with API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }

    /// Set timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

/// A single structured-output request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Natural-language instruction.
    pub prompt: String,

    /// JSON schema the response text must conform to.
    pub response_schema: serde_json::Value,
}

/// Raw response from the service.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Response text, expected to be JSON.
    pub text: String,

    /// Tokens used for the request.
    pub tokens_used: Option<u32>,
}

/// Trait that generative backends must implement.
///
/// One call is one request: implementations do not retry.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Send the request and return the raw response text.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

/// Canned outcome returned by [`MockGenerator`].
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    NetworkFailure(String),
    ProviderFailure(String),
}

/// A mock generator for testing.
#[derive(Debug)]
pub struct MockGenerator {
    reply: MockReply,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Answer every request with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::from_reply(MockReply::Text(text.into()))
    }

    /// Fail every request with a network error.
    pub fn failing_network(message: impl Into<String>) -> Self {
        Self::from_reply(MockReply::NetworkFailure(message.into()))
    }

    /// Fail every request with a service-side error.
    pub fn failing_provider(message: impl Into<String>) -> Self {
        Self::from_reply(MockReply::ProviderFailure(message.into()))
    }

    fn from_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Text(text) => Ok(GenerationResponse {
                text: text.clone(),
                tokens_used: Some(10),
            }),
            MockReply::NetworkFailure(msg) => Err(ExporterError::NetworkError(msg.clone())),
            MockReply::ProviderFailure(msg) => Err(ExporterError::ProviderError(msg.clone())),
        }
    }
}
