//! Unknown-word store abstraction
//!
//! The ledger only talks to storage through `UnknownWordStore`, so the
//! in-memory and file-backed implementations can be swapped without
//! touching merge or prompt logic.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::server::services::ledger::merge_unknown_words;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Cumulative unknown words recorded for one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownWordRecord {
  pub term: String,
  pub unknown_words: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl UnknownWordRecord {
  pub fn new(term: &str, unknown_words: Vec<String>) -> Self {
    let now = Utc::now();
    Self { term: term.to_string(), unknown_words, created_at: now, updated_at: now }
  }
}

/// Persistence interface for the unknown-word ledger
#[async_trait]
pub trait UnknownWordStore: Send + Sync {
  /// Fetch the record for an exact term
  async fn get_unknown_words(&self, term: &str) -> Result<Option<UnknownWordRecord>>;

  /// Create the record or overwrite its word set, refreshing `updated_at`
  async fn upsert_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord>;

  /// Every record in the store
  async fn list_all_unknown_words(&self) -> Result<Vec<UnknownWordRecord>>;

  /// Drop every record
  async fn clear_all_unknown_words(&self) -> Result<()>;

  /// Union `unknown_words` into the term's set.
  ///
  /// The default is a plain read-modify-write; stores that can do better
  /// override it with a single atomic step.
  async fn add_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord> {
    let existing = self.get_unknown_words(term).await?.map(|r| r.unknown_words).unwrap_or_default();
    let merged = merge_unknown_words(&existing, unknown_words);
    self.upsert_unknown_words(term, &merged).await
  }

  /// Short human-readable description for status output
  fn describe(&self) -> String;
}

/// Build the store selected by configuration
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn UnknownWordStore>> {
  match config {
    StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
    StorageConfig::File { path } => Ok(Arc::new(FileStore::open(path)?)),
  }
}
