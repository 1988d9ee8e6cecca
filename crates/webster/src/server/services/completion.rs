//! Language model completion client
//!
//! `Completer` is the seam the dictionary service calls; `DeepSeekClient`
//! talks to an OpenAI-compatible chat completions endpoint.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;

const MAX_ERROR_BODY: usize = 300;

/// Turns a prompt into raw model text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Completer: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessage<'a>>,
  temperature: f32,
  max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
  message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
  #[serde(default)]
  content: Option<String>,
}

/// DeepSeek (or any OpenAI-compatible) chat completion client
pub struct DeepSeekClient {
  http: Client,
  api_key: String,
  config: LlmConfig,
}

impl std::fmt::Debug for DeepSeekClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeepSeekClient")
      .field("base_url", &self.config.base_url)
      .field("model", &self.config.model)
      .field("api_key", &"[redacted]")
      .finish()
  }
}

impl DeepSeekClient {
  /// Create a client reading the API key from the configured environment variable
  pub fn from_config(config: &LlmConfig) -> Result<Self> {
    let api_key = std::env::var(&config.api_key_env)
      .map_err(|_| anyhow!("{} environment variable not set", config.api_key_env))?;
    Self::new(config.clone(), api_key)
  }

  pub fn new(config: LlmConfig, api_key: String) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self { http, api_key, config })
  }

  fn endpoint(&self) -> String {
    format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
  }

  /// Keep provider error bodies short and free of the credential
  fn sanitize(&self, body: &str) -> String {
    let redacted = if self.api_key.is_empty() {
      body.to_string()
    } else {
      body.replace(&self.api_key, "[redacted]")
    };
    redacted.chars().take(MAX_ERROR_BODY).collect()
  }
}

#[async_trait]
impl Completer for DeepSeekClient {
  async fn complete(&self, prompt: &str) -> Result<String> {
    let request = ChatRequest {
      model: &self.config.model,
      messages: vec![ChatMessage { role: "user", content: prompt }],
      temperature: self.config.temperature,
      max_tokens: self.config.max_tokens,
    };

    let response = self
      .http
      .post(self.endpoint())
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await
      .context("Failed to reach completion endpoint")?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      bail!("Completion endpoint returned {}: {}", status, self.sanitize(&body));
    }

    let parsed: ChatResponse = response.json().await.context("Malformed completion response")?;

    let content = parsed
      .choices
      .into_iter()
      .next()
      .and_then(|choice| choice.message.content)
      .ok_or_else(|| anyhow!("Completion response contained no message"))?;

    Ok(content.trim().to_string())
  }
}
