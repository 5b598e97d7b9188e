//! Chat-completions client for OpenAI-compatible APIs.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::ResolvedLlm;
use super::prompts::{extraction_user_prompt, EXTRACTION_SYSTEM_PROMPT};

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was supplied by the request or the server config.
    #[error("no API key configured")]
    MissingApiKey,
    /// Failed to reach the service, or the request timed out.
    #[error("connection error: {0}")]
    Connection(String),
    /// The service answered with a non-success status.
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtworksEnvelope {
    #[serde(default)]
    artworks: Value,
}

/// Single-shot client; never retries.
pub struct LlmClient {
    settings: ResolvedLlm,
    api_key: String,
    client: Client,
}

impl LlmClient {
    /// Create a client for the resolved settings.
    pub fn new(settings: ResolvedLlm) -> Result<Self, LlmError> {
        let api_key = settings.api_key.clone().ok_or(LlmError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    /// Model name used for requests.
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Ask the model for artworks in `text`.
    ///
    /// Items of the returned `artworks` array are passed through untouched;
    /// an unparseable reply yields an empty list.
    pub async fn extract_artworks(&self, text: &str) -> Result<Vec<Value>, LlmError> {
        let user_prompt = extraction_user_prompt(text);
        let content = self
            .chat_json(EXTRACTION_SYSTEM_PROMPT, &user_prompt)
            .await?;
        Ok(parse_artworks(&content))
    }

    /// Send one chat-completions request in JSON mode and return the reply text.
    ///
    /// A reply without `choices[0].message.content` is treated as `{}`.
    async fn chat_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.settings.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.settings.endpoint);
        debug!("POST {} (model {})", url, self.settings.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        let content = match serde_json::from_str::<ChatResponse>(&body) {
            Ok(parsed) => parsed
                .choices
                .and_then(|choices| choices.into_iter().next())
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
            Err(e) => {
                warn!("Unexpected chat-completions body: {}", e);
                None
            }
        };

        Ok(content.unwrap_or_else(|| "{}".to_string()))
    }
}

/// Pull the `artworks` array out of a model reply.
pub fn parse_artworks(content: &str) -> Vec<Value> {
    match serde_json::from_str::<ArtworksEnvelope>(content) {
        Ok(ArtworksEnvelope {
            artworks: Value::Array(items),
        }) => items,
        Ok(_) => Vec::new(),
        Err(e) => {
            debug!("Model reply is not a JSON object: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ExtractionOptions, LlmConfig};

    #[test]
    fn test_parse_artworks() {
        let items = parse_artworks(
            r#"{"artworks":[{"title":"Kouros","artist":"anonymous","year":-530,"extra":true}]}"#,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["extra"], true);

        assert!(parse_artworks("not json").is_empty());
        assert!(parse_artworks("{}").is_empty());
        assert!(parse_artworks(r#"{"artworks":"none"}"#).is_empty());
        assert!(parse_artworks("[1,2,3]").is_empty());
    }

    #[test]
    fn test_client_requires_key() {
        let resolved = LlmConfig::default().resolve(&ExtractionOptions::default());
        assert!(matches!(
            LlmClient::new(resolved),
            Err(LlmError::MissingApiKey)
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.2,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
