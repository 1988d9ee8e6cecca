//! Error taxonomy surfaced to API callers

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
  /// A required field was missing or unusable
  #[error("{0}")]
  Validation(String),

  /// The addressed entry does not exist
  #[error("{0}")]
  NotFound(String),

  /// The unknown-word store could not be read or written
  #[error("Storage error: {0}")]
  Storage(String),

  /// The language model call failed or timed out
  #[error("Completion error: {0}")]
  Completion(String),
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

impl DictionaryError {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::NotFound(message.into())
  }

  /// Wrap a store failure, keeping the whole cause chain in the message
  pub fn storage(error: anyhow::Error) -> Self {
    Self::Storage(format!("{error:#}"))
  }

  /// Wrap a completion failure, keeping the whole cause chain in the message
  pub fn completion(error: anyhow::Error) -> Self {
    Self::Completion(format!("{error:#}"))
  }

  /// Short machine-readable key for the error body
  pub fn key(&self) -> &'static str {
    match self {
      Self::Validation(_) => "validation_error",
      Self::NotFound(_) => "not_found",
      Self::Storage(_) => "storage_error",
      Self::Completion(_) => "completion_error",
    }
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::Validation(_) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Storage(_) | Self::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}
