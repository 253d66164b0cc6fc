//! Anthropic Messages API client.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use agronova_core::config::LlmConfig;

use crate::llm::{ChatTurn, LlmClient};

const API_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct AnthropicSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AnthropicSettings {
    /// `None` when no API key is configured.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let api_key = config.api_key.as_ref()?;
        if api_key.expose_secret().trim().is_empty() {
            return None;
        }
        Some(Self {
            api_key: api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

pub struct AnthropicClient {
    client: reqwest::Client,
    settings: AnthropicSettings,
}

impl AnthropicClient {
    pub fn new(settings: AnthropicSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("agronova/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build anthropic http client")?;
        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.settings.base_url.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_request<'a>(
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatTurn],
) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens,
        system,
        messages: messages
            .iter()
            .map(|turn| RequestMessage { role: turn.role.as_str(), content: &turn.content })
            .collect(),
    }
}

fn first_text(body: &str) -> Result<String> {
    let response: MessagesResponse =
        serde_json::from_str(body).context("failed to decode anthropic response")?;
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .ok_or_else(|| anyhow!("anthropic response carried no text block"))
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}"))
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, system: &str, messages: &[ChatTurn]) -> Result<String> {
        let request =
            build_request(&self.settings.model, self.settings.max_tokens, system, messages);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", self.settings.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .context("anthropic request failed")?;

        let status = response.status();
        let body = response.text().await.context("failed to read anthropic response")?;

        if !status.is_success() {
            bail!("anthropic returned {status}: {}", error_message(status, &body));
        }

        first_text(&body)
    }
}
