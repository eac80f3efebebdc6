use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use orgbot_core::config::{LlmSettings, TEMPERATURE_RANGE};
use orgbot_core::traits::ChatModel;
use orgbot_core::types::ChatMessage;

use crate::error::{LlmError, Result};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Blocking client for Ollama's `/api/chat`.
///
/// Owns a current-thread runtime, so `chat` must not be called from inside
/// another Tokio runtime.
pub struct OllamaChat {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    endpoint: String,
    model: String,
}

impl OllamaChat {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(LlmError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            endpoint: format!("{}/api/chat", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
        })
    }

    async fn send(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions { temperature },
        };
        let body = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: ChatResponse = serde_json::from_slice(&body)?;
        let content = response
            .message
            .map(|m| m.content)
            .ok_or(LlmError::EmptyResponse { provider: "ollama" })?;
        debug!(model = %self.model, chars = content.len(), "ollama reply");
        Ok(content)
    }
}

impl ChatModel for OllamaChat {
    fn name(&self) -> &str {
        "ollama"
    }

    fn chat(&self, messages: &[ChatMessage], temperature: f32) -> anyhow::Result<String> {
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(LlmError::Temperature(temperature).into());
        }
        Ok(self.runtime.block_on(self.send(messages, temperature))?)
    }
}
