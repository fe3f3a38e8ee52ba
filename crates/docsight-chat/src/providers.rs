//! Chat-completion clients.
//!
//! Azure OpenAI and OpenAI-compatible APIs share the request and response
//! format and differ only in URL layout and auth header.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ChatConfig;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatProvider, ModelReply};
use docsight_core::{Error, Result};

/// A chat model that answers one completion request.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model id sent with each request.
    fn model_id(&self) -> String;

    async fn complete(&self, request: ChatCompletionRequest) -> Result<ModelReply>;
}

/// HTTP chat client for the configured provider.
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    fn model_id(&self) -> String {
        self.config
            .resolve_provider()
            .map(|t| t.model)
            .unwrap_or_default()
    }

    async fn complete(&self, request: ChatCompletionRequest) -> Result<ModelReply> {
        let target = self
            .config
            .resolve_provider()
            .ok_or_else(|| Error::ModelCall("No chat provider configured".into()))?;

        debug!(
            "Requesting completion from {} with model {}",
            target.provider, request.model
        );

        let builder = self.client.post(&target.url).json(&request);
        let builder = match target.provider {
            ChatProvider::Azure => builder.header("api-key", &target.api_key),
            ChatProvider::OpenAI => {
                builder.header("Authorization", format!("Bearer {}", target.api_key))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::ModelCall(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelCall(format!("API error {}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelCall(format!("Invalid completion response: {}", e)))?;

        let choice = parsed
            .choices
            .first()
            .ok_or_else(|| Error::ModelCall("Completion response has no choices".into()))?;

        Ok(ModelReply::from_json(&choice.message.content))
    }
}
