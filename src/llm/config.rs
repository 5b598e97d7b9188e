//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// Server-side defaults for the chat-completions service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Credential used when a request does not bring its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENDPOINT`: API base URL
    /// - `LLM_MODEL`: Model name
    /// - `LLM_API_KEY`: API key (falls back to `OPENAI_API_KEY`)
    /// - `LLM_TIMEOUT_SECS`: Request timeout
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.model = model;
        }
        if let Some(key) = std::env::var("LLM_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        {
            self.api_key = Some(key);
        }
        if let Some(secs) = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = secs;
        }
        self
    }

    /// Resolve the settings for one call, letting per-request options win.
    pub fn resolve(&self, options: &ExtractionOptions) -> ResolvedLlm {
        ResolvedLlm {
            endpoint: non_blank(options.base_url.as_deref())
                .unwrap_or(&self.endpoint)
                .trim_end_matches('/')
                .to_string(),
            api_key: non_blank(options.api_key.as_deref())
                .or_else(|| non_blank(self.api_key.as_deref()))
                .map(String::from),
            model: non_blank(options.model.as_deref())
                .unwrap_or(&self.model)
                .to_string(),
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Client-held AI settings supplied with a single extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOptions {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Effective settings for one remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLlm {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}
