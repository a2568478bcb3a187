//! Reasoning service boundary.
//!
//! The analysis engine talks to a language model through one narrow call,
//! [`ReasoningService::complete`]. Production code uses [`AnthropicClient`];
//! tests substitute a deterministic implementation.

use crate::config::ReasoningConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Version header required by the Messages API.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single-shot text completion service.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Send one system/user instruction pair and return the model's text.
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String>;
}

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicClient {
    /// Build a client from configuration and an API key.
    pub fn new(config: &ReasoningConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("specscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
        })
    }

    /// Model identifier this client sends.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ReasoningService for AnthropicClient {
    #[instrument(skip_all, fields(model = %self.model, max_tokens = max_tokens))]
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: [UserMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout("reasoning service request".to_string())
                } else {
                    Error::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Reasoning(format!("HTTP {}: {}", status.as_u16(), detail.trim())));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Reasoning(format!("unreadable response: {e}")))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(Error::Reasoning("response contained no text".to_string()));
        }

        debug!(chars = text.len(), "Reasoning service responded");
        Ok(text)
    }
}
