//! JSON file backed unknown-word store
//!
//! The whole ledger lives in one JSON document keyed by term. Records are
//! cached after opening; every mutation rewrites the file through a
//! temporary sibling and a rename.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::memory::{union_record, upsert_record};
use super::{UnknownWordRecord, UnknownWordStore};

pub struct FileStore {
  path: PathBuf,
  records: Mutex<BTreeMap<String, UnknownWordRecord>>,
}

impl FileStore {
  /// Open the store at `path`, creating parent directories as needed
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref().to_path_buf();

    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create store directory {}", parent.display()))?;
    }

    let records = if path.exists() { read_records(&path)? } else { BTreeMap::new() };
    tracing::debug!("Opened unknown-word store at {} ({} terms)", path.display(), records.len());

    Ok(Self { path, records: Mutex::new(records) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn persist(&self, records: &BTreeMap<String, UnknownWordRecord>) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize ledger")?;
    let staging = self.path.with_extension("json.tmp");

    std::fs::write(&staging, json)
      .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, &self.path)
      .with_context(|| format!("Failed to replace {}", self.path.display()))?;

    Ok(())
  }
}

fn read_records(path: &Path) -> Result<BTreeMap<String, UnknownWordRecord>> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  if content.trim().is_empty() {
    return Ok(BTreeMap::new());
  }

  serde_json::from_str(&content)
    .with_context(|| format!("Malformed ledger file {}", path.display()))
}

#[async_trait]
impl UnknownWordStore for FileStore {
  async fn get_unknown_words(&self, term: &str) -> Result<Option<UnknownWordRecord>> {
    Ok(self.records.lock().await.get(term).cloned())
  }

  async fn upsert_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord> {
    let mut records = self.records.lock().await;
    let mut updated = records.clone();
    let record = upsert_record(&mut updated, term, unknown_words);
    self.persist(&updated)?;
    *records = updated;
    Ok(record)
  }

  async fn list_all_unknown_words(&self) -> Result<Vec<UnknownWordRecord>> {
    Ok(self.records.lock().await.values().cloned().collect())
  }

  async fn clear_all_unknown_words(&self) -> Result<()> {
    let mut records = self.records.lock().await;
    self.persist(&BTreeMap::new())?;
    records.clear();
    Ok(())
  }

  async fn add_unknown_words(
    &self,
    term: &str,
    unknown_words: &[String],
  ) -> Result<UnknownWordRecord> {
    let mut records = self.records.lock().await;
    let mut updated = records.clone();
    let record = union_record(&mut updated, term, unknown_words);
    self.persist(&updated)?;
    *records = updated;
    Ok(record)
  }

  fn describe(&self) -> String {
    format!("file:{}", self.path.display())
  }
}
