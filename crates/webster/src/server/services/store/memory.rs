//! Process-local unknown-word store

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::{UnknownWordRecord, UnknownWordStore};
use crate::server::services::ledger::merge_unknown_words;

/// Records kept in a map keyed by term, lost on restart
#[derive(Default)]
pub struct MemoryStore {
  records: Mutex<BTreeMap<String, UnknownWordRecord>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Overwrite or create a record in place
pub(super) fn upsert_record(
  records: &mut BTreeMap<String, UnknownWordRecord>,
  term: &str,
  unknown_words: &[String],
) -> UnknownWordRecord {
  let record = records
    .entry(term.to_string())
    .and_modify(|record| {
      record.unknown_words = unknown_words.to_vec();
      record.updated_at = Utc::now();
    })
    .or_insert_with(|| UnknownWordRecord::new(term, unknown_words.to_vec()));
  record.clone()
}

/// Union new words into a record in place
pub(super) fn union_record(
  records: &mut BTreeMap<String, UnknownWordRecord>,
  term: &str,
  unknown_words: &[String],
) -> UnknownWordRecord {
  let existing = records.get(term).map(|r| r.unknown_words.as_slice()).unwrap_or_default();
  let merged = merge_unknown_words(existing, unknown_words);
  upsert_record(records, term, &merged)
}

#[async_trait]
impl UnknownWordStore for MemoryStore {
  async fn get_unknown_words(&self, term: &str) -> Result<Option<UnknownWordRecord>> {
    Ok(self.records.lock().await.get(term).cloned())
  }

  async fn upsert_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord> {
    let mut records = self.records.lock().await;
    Ok(upsert_record(&mut records, term, unknown_words))
  }

  async fn list_all_unknown_words(&self) -> Result<Vec<UnknownWordRecord>> {
    Ok(self.records.lock().await.values().cloned().collect())
  }

  async fn clear_all_unknown_words(&self) -> Result<()> {
    self.records.lock().await.clear();
    Ok(())
  }

  async fn add_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord> {
    let mut records = self.records.lock().await;
    Ok(union_record(&mut records, term, unknown_words))
  }

  fn describe(&self) -> String {
    "memory".to_string()
  }
}
