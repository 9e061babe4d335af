// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat-completions client for multimodal image generation (OpenRouter-compatible API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;

/// Errors from a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },

    /// Response body was not a chat completion
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// Request could not be built (e.g. missing API key)
    #[error("invalid provider request: {0}")]
    InvalidRequest(String),
}

// --- Request types ---

/// Request body for `POST {api_url}/chat/completions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// Multimodal content part, tagged by `type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatCompletionRequest {
    /// Single user message carrying the prompt and the reference image
    pub fn image_edit(model: &str, prompt: &str, image_data_url: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_url.to_string(),
                        },
                    },
                ],
            }],
        }
    }

    /// Text of the first text part, if any
    pub fn prompt_text(&self) -> Option<&str> {
        self.messages
            .first()?
            .content
            .iter()
            .find_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
    }
}

// --- Response types ---

/// Raw chat-completions reply
///
/// Kept as untyped JSON: only `choices[0].message.images[0]` is ever read, so
/// odd shapes anywhere else must not stop the first image from being found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletionResponse {
    raw: Value,
}

impl ChatCompletionResponse {
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// URL of the first image of the first choice, only when its type is `image_url`
    pub fn first_image_url(&self) -> Option<&str> {
        let image = self.raw.pointer("/choices/0/message/images/0")?;
        if image.get("type").and_then(Value::as_str) != Some("image_url") {
            return None;
        }
        image.pointer("/image_url/url")?.as_str()
    }

    /// Number of images in the first choice (for logging)
    pub fn image_count(&self) -> usize {
        self.raw
            .pointer("/choices/0/message/images")
            .and_then(Value::as_array)
            .map_or(0, |images| images.len())
    }
}

impl From<Value> for ChatCompletionResponse {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

/// Seam between the endpoint and the remote provider
#[async_trait]
pub trait ImageGenerationProvider: Send + Sync {
    /// Send one chat-completions request using the resolved configuration
    async fn chat_completion(
        &self,
        config: &ProviderConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// reqwest-backed chat-completions client
pub struct ChatCompletionsClient {
    client: Client,
}

impl ChatCompletionsClient {
    /// Create a client; `timeout` of `None` leaves reqwest's default (no timeout)
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ImageGenerationProvider for ChatCompletionsClient {
    async fn chat_completion(
        &self,
        config: &ProviderConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::InvalidRequest("API key is not configured".to_string()))?;

        let url = config.completions_url();
        debug!("Chat completion POST {} model={}", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "chat-completions"
    }
}
