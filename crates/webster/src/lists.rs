//! Word lists kept by the dictionary service
//!
//! - `History`: most-recent-first, one entry per term, capped
//! - `Favorites`: toggled membership keyed by term
//! - `Vocabulary`: explicit add/remove keyed by term

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, Result};

pub const HISTORY_CAPACITY: usize = 100;

/// A finished lookup: the term, its cleaned definition and when it was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DefinitionResult {
  pub term: String,
  pub definition: String,
  #[serde(with = "timestamp")]
  #[schemars(with = "String")]
  pub timestamp: DateTime<Utc>,
}

impl DefinitionResult {
  pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
    Self { term: term.into(), definition: definition.into(), timestamp: Utc::now() }
  }

  /// Build an entry from caller-supplied fields, rejecting blanks
  pub fn from_fields(term: Option<&str>, definition: Option<&str>) -> Result<Self> {
    match (non_blank(term), non_blank(definition)) {
      (Some(term), Some(definition)) => Ok(Self::new(term, definition)),
      _ => Err(DictionaryError::validation("Term and definition are required")),
    }
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub mod timestamp {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
      .map(|parsed| parsed.with_timezone(&Utc))
      .map_err(serde::de::Error::custom)
  }
}

// History
// =======

#[derive(Debug, Clone)]
pub struct History {
  entries: Vec<DefinitionResult>,
  capacity: usize,
}

impl Default for History {
  fn default() -> Self {
    Self::with_capacity(HISTORY_CAPACITY)
  }
}

impl History {
  pub fn with_capacity(capacity: usize) -> Self {
    Self { entries: Vec::new(), capacity }
  }

  /// Move `result` to the front, dropping any older entry for the same term
  pub fn insert(&mut self, result: DefinitionResult) {
    self.entries.retain(|entry| entry.term != result.term);
    self.entries.insert(0, result);
    self.entries.truncate(self.capacity);
  }

  pub fn entries(&self) -> &[DefinitionResult] {
    &self.entries
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

// Favorites
// =========

#[derive(Debug, Clone, Default)]
pub struct Favorites {
  entries: Vec<DefinitionResult>,
}

impl Favorites {
  /// Flip membership of `result.term`; returns whether it is now a favorite
  pub fn toggle(&mut self, result: DefinitionResult) -> bool {
    match self.position(&result.term) {
      Some(index) => {
        self.entries.remove(index);
        false
      }
      None => {
        self.entries.push(result);
        true
      }
    }
  }

  pub fn contains(&self, term: &str) -> bool {
    self.position(term).is_some()
  }

  pub fn entries(&self) -> &[DefinitionResult] {
    &self.entries
  }

  fn position(&self, term: &str) -> Option<usize> {
    self.entries.iter().position(|entry| entry.term == term)
  }
}

// Vocabulary
// ==========

/// Outcome of adding a word to the vocabulary list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyAdd {
  Added,
  AlreadyPresent,
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
  entries: Vec<DefinitionResult>,
}

impl Vocabulary {
  /// Append unless the term is already present
  pub fn add(&mut self, result: DefinitionResult) -> VocabularyAdd {
    if self.contains(&result.term) {
      return VocabularyAdd::AlreadyPresent;
    }
    self.entries.push(result);
    VocabularyAdd::Added
  }

  pub fn remove(&mut self, term: &str) -> Result<DefinitionResult> {
    match self.entries.iter().position(|entry| entry.term == term) {
      Some(index) => Ok(self.entries.remove(index)),
      None => Err(DictionaryError::not_found("Word not found in vocabulary")),
    }
  }

  pub fn contains(&self, term: &str) -> bool {
    self.entries.iter().any(|entry| entry.term == term)
  }

  pub fn entries(&self) -> &[DefinitionResult] {
    &self.entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn word(term: &str) -> DefinitionResult {
    DefinitionResult::new(term, format!("definition of {term}"))
  }

  #[test]
  fn test_history_is_most_recent_first() {
    let mut history = History::default();
    history.insert(word("alpha"));
    history.insert(word("beta"));

    let terms: Vec<_> = history.entries().iter().map(|e| e.term.as_str()).collect();
    assert_eq!(terms, vec!["beta", "alpha"]);
  }

  #[test]
  fn test_history_reinsert_moves_term_to_front() {
    let mut history = History::default();
    history.insert(word("alpha"));
    history.insert(word("beta"));
    history.insert(DefinitionResult::new("alpha", "newer"));

    assert_eq!(history.len(), 2);
    assert_eq!(history.entries()[0].term, "alpha");
    assert_eq!(history.entries()[0].definition, "newer");
  }

  #[test]
  fn test_history_evicts_oldest_beyond_capacity() {
    let mut history = History::default();
    for i in 0..=HISTORY_CAPACITY {
      history.insert(word(&format!("term{i}")));
    }

    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.entries()[0].term, format!("term{HISTORY_CAPACITY}"));
    assert!(history.entries().iter().all(|e| e.term != "term0"));
  }

  #[test]
  fn test_history_clear() {
    let mut history = History::default();
    history.insert(word("alpha"));
    history.clear();
    assert!(history.is_empty());
  }

  #[test]
  fn test_favorite_toggle_is_its_own_inverse() {
    let mut favorites = Favorites::default();
    favorites.toggle(word("other"));

    assert!(favorites.toggle(word("integrate")));
    assert!(favorites.contains("integrate"));
    assert!(!favorites.toggle(word("integrate")));
    assert!(!favorites.contains("integrate"));
    assert_eq!(favorites.entries().len(), 1);
  }

  #[test]
  fn test_vocabulary_add_is_idempotent() {
    let mut vocabulary = Vocabulary::default();
    assert_eq!(vocabulary.add(word("integrate")), VocabularyAdd::Added);
    assert_eq!(vocabulary.add(word("integrate")), VocabularyAdd::AlreadyPresent);
    assert_eq!(vocabulary.entries().len(), 1);
  }

  #[test]
  fn test_vocabulary_remove_missing_term_fails() {
    let mut vocabulary = Vocabulary::default();
    vocabulary.add(word("integrate"));

    assert!(vocabulary.remove("integrate").is_ok());
    assert!(matches!(vocabulary.remove("integrate"), Err(DictionaryError::NotFound(_))));
  }

  #[test]
  fn test_from_fields_requires_term_and_definition() {
    assert!(DefinitionResult::from_fields(Some("a"), Some("b")).is_ok());
    assert!(matches!(
      DefinitionResult::from_fields(Some(""), Some("b")),
      Err(DictionaryError::Validation(_))
    ));
    assert!(matches!(
      DefinitionResult::from_fields(Some("a"), None),
      Err(DictionaryError::Validation(_))
    ));
  }

  #[test]
  fn test_timestamp_uses_millisecond_rfc3339() {
    let mut result = word("integrate");
    result.timestamp = DateTime::parse_from_rfc3339("2024-05-01T10:20:30.123456Z")
      .unwrap()
      .with_timezone(&Utc);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["timestamp"], "2024-05-01T10:20:30.123Z");
  }
}
