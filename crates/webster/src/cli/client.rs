//! HTTP client for the Webster REST API
//!
//! A thin wrapper so the CLI can talk to a local or remote server.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::lists::DefinitionResult;
use crate::server::types::{
  AddVocabularyResponse, DefineRequest, ErrorResponse, FavoriteResponse, LogsResponse,
  MessageResponse, StatusResponse, WordRequest,
};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Configuration for the Webster HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the server (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: 30 }
  }
}

pub struct WebsterClient {
  client: Client,
  config: ClientConfig,
}

impl WebsterClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response> {
    let response = request
      .send()
      .await
      .with_context(|| format!("Could not reach Webster server at {}", self.config.base_url))?;

    if response.status().is_success() {
      return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
      Ok(error) => Err(anyhow!("{} (HTTP {})", error.message, status.as_u16())),
      Err(_) => Err(anyhow!("Request failed: HTTP {} {}", status.as_u16(), body.trim())),
    }
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let response = self.send(self.client.get(self.url(path))).await?;
    response.json().await.context("Malformed server response")
  }

  async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
    let response = self.send(self.client.post(self.url(path)).json(body)).await?;
    response.json().await.context("Malformed server response")
  }

  async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let response = self.send(self.client.delete(self.url(path))).await?;
    response.json().await.context("Malformed server response")
  }

  pub async fn define(&self, word: &str, unknown_words: &[String]) -> Result<DefinitionResult> {
    let request =
      DefineRequest { word: Some(word.to_string()), unknown_words: unknown_words.to_vec() };
    self.post("/define", &request).await
  }

  pub async fn history(&self) -> Result<Vec<DefinitionResult>> {
    self.get("/history").await
  }

  pub async fn clear_history(&self) -> Result<MessageResponse> {
    self.delete("/history").await
  }

  pub async fn toggle_favorite(&self, term: &str, definition: &str) -> Result<FavoriteResponse> {
    self.post("/favorites", &word_request(term, definition)).await
  }

  pub async fn favorites(&self) -> Result<Vec<DefinitionResult>> {
    self.get("/favorites").await
  }

  pub async fn add_vocabulary(
    &self,
    term: &str,
    definition: &str,
  ) -> Result<AddVocabularyResponse> {
    self.post("/vocabulary", &word_request(term, definition)).await
  }

  pub async fn vocabulary(&self) -> Result<Vec<DefinitionResult>> {
    self.get("/vocabulary").await
  }

  pub async fn remove_vocabulary(&self, term: &str) -> Result<MessageResponse> {
    let mut url = Url::parse(&self.url("/vocabulary")).context("Invalid server URL")?;
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("Invalid server URL: {}", self.config.base_url))?
      .push(term);

    let response = self.send(self.client.delete(url)).await?;
    response.json().await.context("Malformed server response")
  }

  pub async fn unknown_words(&self) -> Result<Vec<String>> {
    self.get("/unknown-words").await
  }

  pub async fn clear_unknown_words(&self) -> Result<MessageResponse> {
    self.delete("/unknown-words").await
  }

  pub async fn status(&self) -> Result<StatusResponse> {
    self.get("/status").await
  }

  pub async fn logs(&self, limit: usize, level: &str) -> Result<LogsResponse> {
    let query = [("limit", limit.to_string()), ("level", level.to_string())];
    let request = self.client.get(self.url("/logs")).query(&query);
    let response = self.send(request).await?;
    response.json().await.context("Malformed server response")
  }
}

fn word_request(term: &str, definition: &str) -> WordRequest {
  WordRequest { term: Some(term.to_string()), definition: Some(definition.to_string()) }
}

/// Client for `server`, falling back to `$WEBSTER_SERVER_URL` and then localhost
pub fn get_client(server: Option<&str>) -> Result<WebsterClient> {
  let base_url = server
    .map(str::to_string)
    .or_else(|| std::env::var("WEBSTER_SERVER_URL").ok())
    .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

  let timeout_secs = std::env::var("WEBSTER_TIMEOUT_SECS")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(ClientConfig::default().timeout_secs);

  WebsterClient::with_config(ClientConfig { base_url, timeout_secs })
}
