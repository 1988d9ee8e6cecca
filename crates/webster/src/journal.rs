//! Persistent request journal
//!
//! Structured entries appended to a JSONL file, one line per event, with
//! optional request context. Writes go through an async mutex so handlers
//! can share a single journal. Every entry is mirrored to `tracing`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Request context attached to journal entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntryContext {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,
}

/// A single journal line
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JournalEntry {
  pub timestamp: DateTime<Utc>,
  pub level: String,
  pub message: String,
  pub component: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<EntryContext>,
}

struct JournalInner {
  path: PathBuf,
}

/// Thread-safe JSONL journal, cheap to clone
#[derive(Clone)]
pub struct RequestJournal {
  inner: Arc<Mutex<JournalInner>>,
}

impl JournalInner {
  fn append(&self, entry: &JournalEntry) -> std::io::Result<()> {
    let line = serde_json::to_string(entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(file, "{line}")?;
    file.flush()
  }

  /// Most recent `limit` entries matching `level`, oldest first
  fn read(&self, limit: Option<usize>, level: Option<&str>) -> std::io::Result<Vec<JournalEntry>> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(&self.path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }

      // Skip malformed lines
      let Ok(entry) = serde_json::from_str::<JournalEntry>(&line) else {
        continue;
      };

      if level.map_or(true, |filter| filter == "all" || entry.level == filter) {
        entries.push(entry);
      }
    }

    if let Some(limit) = limit {
      let skip = entries.len().saturating_sub(limit);
      entries.drain(..skip);
    }

    Ok(entries)
  }
}

impl RequestJournal {
  /// Open (or create) a journal at `path`
  pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
    let path = path.as_ref().to_path_buf();

    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
      File::create(&path)?;
    }

    Ok(Self { inner: Arc::new(Mutex::new(JournalInner { path })) })
  }

  pub async fn path(&self) -> PathBuf {
    self.inner.lock().await.path.clone()
  }

  /// Append an entry, reporting I/O failures
  pub async fn append(
    &self,
    level: &str,
    message: &str,
    component: &str,
    context: Option<EntryContext>,
  ) -> std::io::Result<()> {
    let entry = JournalEntry {
      timestamp: Utc::now(),
      level: level.to_string(),
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    self.inner.lock().await.append(&entry)
  }

  /// Append an entry and mirror it to tracing; journal write failures are only traced
  pub async fn record(
    &self,
    level: &str,
    message: &str,
    component: &str,
    context: Option<EntryContext>,
  ) {
    match level {
      "error" => tracing::error!(component, "{message}"),
      "warn" => tracing::warn!(component, "{message}"),
      "debug" => tracing::debug!(component, "{message}"),
      _ => tracing::info!(component, "{message}"),
    }

    if let Err(e) = self.append(level, message, component, context).await {
      tracing::warn!("Failed to write journal entry: {e}");
    }
  }

  pub async fn info(&self, message: &str, component: &str) {
    self.record("info", message, component, None).await;
  }

  pub async fn warn(&self, message: &str, component: &str) {
    self.record("warn", message, component, None).await;
  }

  pub async fn error(&self, message: &str, component: &str) {
    self.record("error", message, component, None).await;
  }

  /// Retrieve recent entries, optionally filtered by level (`all` disables the filter)
  pub async fn entries(
    &self,
    limit: Option<usize>,
    level: Option<&str>,
  ) -> std::io::Result<Vec<JournalEntry>> {
    self.inner.lock().await.read(limit, level)
  }
}
