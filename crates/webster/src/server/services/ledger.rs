//! Unknown-word ledger
//!
//! Every lookup folds the learner's newly flagged words into the set
//! already recorded for that term, persists the result, and only then
//! renders the prompt. A completion that fails afterwards still leaves the
//! grown set stored for the next attempt.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{DictionaryError, Result};
use crate::prompt::{PromptParams, PromptTemplate};
use crate::server::services::store::{UnknownWordRecord, UnknownWordStore};

/// Which unknown words are threaded into a prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum AvoidListStrategy {
  /// Only the words recorded for the term being defined
  #[default]
  PerTerm,
  /// Every word recorded for any term (legacy behaviour)
  Global,
}

impl std::fmt::Display for AvoidListStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::PerTerm => write!(f, "per_term"),
      Self::Global => write!(f, "global"),
    }
  }
}

/// Union of `existing` and `new` in first-seen order, blanks dropped
pub fn merge_unknown_words(existing: &[String], new: &[String]) -> Vec<String> {
  let mut merged: Vec<String> = Vec::with_capacity(existing.len() + new.len());
  for word in existing.iter().chain(new) {
    let word = word.trim();
    if !word.is_empty() && !merged.iter().any(|seen| seen == word) {
      merged.push(word.to_string());
    }
  }
  merged
}

pub struct UnknownWordLedger {
  store: Arc<dyn UnknownWordStore>,
  template: PromptTemplate,
  strategy: AvoidListStrategy,
  atomic_merge: bool,
}

impl UnknownWordLedger {
  /// Per-term ledger with relaxed read-modify-write merging
  pub fn new(store: Arc<dyn UnknownWordStore>, template: PromptTemplate) -> Self {
    Self { store, template, strategy: AvoidListStrategy::default(), atomic_merge: false }
  }

  pub fn with_strategy(mut self, strategy: AvoidListStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  /// Merge through the store's atomic union instead of get-then-upsert
  pub fn with_atomic_merge(mut self, atomic_merge: bool) -> Self {
    self.atomic_merge = atomic_merge;
    self
  }

  pub fn strategy(&self) -> AvoidListStrategy {
    self.strategy
  }

  pub fn store(&self) -> &Arc<dyn UnknownWordStore> {
    &self.store
  }

  /// Record `new_unknown_words` for `term` and build the definition prompt
  pub async fn record_and_build_prompt(
    &self,
    term: &str,
    new_unknown_words: &[String],
  ) -> Result<String> {
    let record = self.record(term, new_unknown_words).await?;

    let unknown_words = match self.strategy {
      AvoidListStrategy::PerTerm => record.unknown_words,
      AvoidListStrategy::Global => self.all_unknown_words().await?,
    };

    tracing::debug!(
      "Building prompt for '{}' with {} unknown words ({})",
      term,
      unknown_words.len(),
      self.strategy
    );

    Ok(self.template.render(&PromptParams { term, unknown_words: &unknown_words }))
  }

  async fn record(&self, term: &str, new_unknown_words: &[String]) -> Result<UnknownWordRecord> {
    if self.atomic_merge {
      return self
        .store
        .add_unknown_words(term, new_unknown_words)
        .await
        .map_err(DictionaryError::storage);
    }

    let existing = self
      .store
      .get_unknown_words(term)
      .await
      .map_err(DictionaryError::storage)?
      .map(|record| record.unknown_words)
      .unwrap_or_default();

    let merged = merge_unknown_words(&existing, new_unknown_words);

    self.store.upsert_unknown_words(term, &merged).await.map_err(DictionaryError::storage)
  }

  /// Every unknown word across all terms, deduplicated in first-seen order
  pub async fn all_unknown_words(&self) -> Result<Vec<String>> {
    let records = self.store.list_all_unknown_words().await.map_err(DictionaryError::storage)?;
    let flattened: Vec<String> = records.into_iter().flat_map(|r| r.unknown_words).collect();
    Ok(merge_unknown_words(&[], &flattened))
  }

  /// Forget every recorded unknown word
  pub async fn clear(&self) -> Result<()> {
    self.store.clear_all_unknown_words().await.map_err(DictionaryError::storage)
  }
}
