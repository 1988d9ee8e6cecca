//! REST API types with schemars annotations for schema generation

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DictionaryError;
use crate::journal::JournalEntry;
use crate::lists::DefinitionResult;

// Define Endpoint
// ===============

/// Request body for POST /define
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefineRequest {
  /// Word or phrase to define
  #[serde(default)]
  pub word: Option<String>,

  /// Words the learner does not know; `avoidWords` is accepted as well
  #[serde(default, alias = "avoidWords")]
  pub unknown_words: Vec<String>,
}

// Word Lists
// ==========

/// Request body for POST /favorites and POST /vocabulary
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WordRequest {
  #[serde(default)]
  pub term: Option<String>,

  #[serde(default)]
  pub definition: Option<String>,
}

/// Response for POST /favorites
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
  pub message: String,
  pub is_favorite: bool,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
  pub message: String,
}

impl MessageResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

/// Response for POST /vocabulary: the stored word when created, a note otherwise
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AddVocabularyResponse {
  Created(DefinitionResult),
  AlreadyPresent { message: String, word: DefinitionResult },
}

// Errors
// ======

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
  /// Short machine-readable key
  pub error: String,

  /// Human readable detail
  pub message: String,

  /// Correlates the response with journal entries
  pub transaction_id: Uuid,
}

/// Handler failure carrying the status code and error body
#[derive(Debug)]
pub struct ApiFailure {
  pub status: StatusCode,
  pub body: ErrorResponse,
}

impl ApiFailure {
  pub fn new(status: StatusCode, key: &str, message: impl Into<String>) -> Self {
    Self {
      status,
      body: ErrorResponse {
        error: key.to_string(),
        message: message.into(),
        transaction_id: Uuid::new_v4(),
      },
    }
  }
}

impl From<DictionaryError> for ApiFailure {
  fn from(error: DictionaryError) -> Self {
    Self::new(error.status_code(), error.key(), error.to_string())
  }
}

impl IntoResponse for ApiFailure {
  fn into_response(self) -> Response {
    (self.status, Json(self.body)).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiFailure>;

// Status/Version Endpoints
// ========================

/// Response for /health
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
  pub status: String,
}

/// Response for /status
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  /// Which unknown-word store is active
  pub storage: String,
  /// Avoid-list strategy in effect (`per_term` or `global`)
  pub avoid_list_strategy: String,
  pub validate_terms: bool,
  pub history_size: usize,
}

/// Response for /version
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionResponse {
  pub version: String,
}

/// Response for /api
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiInfoResponse {
  pub version: String,
  /// Route prefixes the API is reachable under
  pub prefixes: Vec<String>,
  /// JSON schema of a definition result
  pub definition_schema: serde_json::Value,
}

// Logs Endpoint
// =============

/// Query parameters for /logs
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LogsQuery {
  /// Number of entries to return, newest last
  pub limit: Option<usize>,
  /// Level filter; `all` returns every level
  pub level: Option<String>,
}

/// Response for /logs
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogsResponse {
  pub logs: Vec<JournalEntry>,
}
