//! Dictionary service and shared application state
//!
//! `DictionaryService` is constructed once at startup and handed to every
//! handler through axum state. It owns the word lists, the unknown-word
//! ledger and the completion client.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::classifier::is_valid_lookup_candidate;
use crate::config::Config;
use crate::error::{DictionaryError, Result};
use crate::journal::RequestJournal;
use crate::lists::{DefinitionResult, Favorites, History, Vocabulary, VocabularyAdd};
use crate::markdown::strip_markdown;
use crate::server::services::completion::Completer;
use crate::server::services::ledger::{AvoidListStrategy, UnknownWordLedger};

/// Behaviour switches for the service, usually taken from `Config`
#[derive(Debug, Clone)]
pub struct ServiceOptions {
  pub completion_timeout: Duration,
  pub validate_terms: bool,
  pub clear_history_clears_ledger: bool,
  pub history_capacity: usize,
}

impl Default for ServiceOptions {
  fn default() -> Self {
    Self {
      completion_timeout: Duration::from_secs(30),
      validate_terms: true,
      clear_history_clears_ledger: false,
      history_capacity: crate::lists::HISTORY_CAPACITY,
    }
  }
}

impl ServiceOptions {
  pub fn from_config(config: &Config) -> Self {
    Self {
      completion_timeout: Duration::from_secs(config.llm.timeout_secs),
      validate_terms: config.validate_terms,
      clear_history_clears_ledger: config.clear_history_clears_ledger,
      history_capacity: config.history_capacity,
    }
  }
}

struct WordLists {
  history: History,
  favorites: Favorites,
  vocabulary: Vocabulary,
}

pub struct DictionaryService {
  ledger: UnknownWordLedger,
  completer: Arc<dyn Completer>,
  lists: Mutex<WordLists>,
  options: ServiceOptions,
}

impl DictionaryService {
  pub fn new(
    ledger: UnknownWordLedger,
    completer: Arc<dyn Completer>,
    options: ServiceOptions,
  ) -> Self {
    let lists = WordLists {
      history: History::with_capacity(options.history_capacity),
      favorites: Favorites::default(),
      vocabulary: Vocabulary::default(),
    };

    Self { ledger, completer, lists: Mutex::new(lists), options }
  }

  /// Define `word`, threading the learner's unknown words into the prompt.
  ///
  /// The ledger is updated before the model is called, so a failed or
  /// timed-out completion still keeps the new unknown words.
  pub async fn define(&self, word: &str, unknown_words: &[String]) -> Result<DefinitionResult> {
    let term = word.trim();
    if term.is_empty() {
      return Err(DictionaryError::validation("Word is required"));
    }
    if self.options.validate_terms && !is_valid_lookup_candidate(term) {
      return Err(DictionaryError::validation(format!(
        "'{term}' does not look like an English word or phrase"
      )));
    }

    let prompt = self.ledger.record_and_build_prompt(term, unknown_words).await?;

    let completion = self.completer.complete(&prompt);
    let raw = tokio::time::timeout(self.options.completion_timeout, completion)
      .await
      .map_err(|_| {
        DictionaryError::completion(anyhow::anyhow!(
          "timed out after {}s",
          self.options.completion_timeout.as_secs_f64()
        ))
      })?
      .map_err(DictionaryError::completion)?;

    let result = DefinitionResult::new(term, strip_markdown(&raw));
    self.lists.lock().await.history.insert(result.clone());

    tracing::info!("Defined '{}' ({} new unknown words)", term, unknown_words.len());
    Ok(result)
  }

  pub async fn history(&self) -> Vec<DefinitionResult> {
    self.lists.lock().await.history.entries().to_vec()
  }

  /// Empty the history; the ledger is only wiped when configured to follow.
  ///
  /// The ledger goes first, so a storage failure leaves the history intact.
  pub async fn clear_history(&self) -> Result<()> {
    if self.options.clear_history_clears_ledger {
      self.ledger.clear().await?;
    }

    self.lists.lock().await.history.clear();

    if self.options.clear_history_clears_ledger {
      tracing::info!("History and unknown-word ledger cleared");
    } else {
      tracing::info!("History cleared");
    }

    Ok(())
  }

  /// Toggle favorite membership, returning whether the term is now a favorite
  pub async fn toggle_favorite(
    &self,
    term: Option<&str>,
    definition: Option<&str>,
  ) -> Result<bool> {
    let result = DefinitionResult::from_fields(term, definition)?;
    Ok(self.lists.lock().await.favorites.toggle(result))
  }

  pub async fn favorites(&self) -> Vec<DefinitionResult> {
    self.lists.lock().await.favorites.entries().to_vec()
  }

  pub async fn add_to_vocabulary(
    &self,
    term: Option<&str>,
    definition: Option<&str>,
  ) -> Result<(VocabularyAdd, DefinitionResult)> {
    let result = DefinitionResult::from_fields(term, definition)?;
    let outcome = self.lists.lock().await.vocabulary.add(result.clone());
    Ok((outcome, result))
  }

  pub async fn vocabulary(&self) -> Vec<DefinitionResult> {
    self.lists.lock().await.vocabulary.entries().to_vec()
  }

  pub async fn remove_from_vocabulary(&self, term: &str) -> Result<DefinitionResult> {
    self.lists.lock().await.vocabulary.remove(term)
  }

  /// Every recorded unknown word across all terms
  pub async fn unknown_words(&self) -> Result<Vec<String>> {
    self.ledger.all_unknown_words().await
  }

  pub async fn clear_unknown_words(&self) -> Result<()> {
    self.ledger.clear().await
  }

  pub fn strategy(&self) -> AvoidListStrategy {
    self.ledger.strategy()
  }

  pub fn storage_description(&self) -> String {
    self.ledger.store().describe()
  }

  pub fn options(&self) -> &ServiceOptions {
    &self.options
  }
}

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
  pub service: Arc<DictionaryService>,
  pub journal: RequestJournal,
}

impl AppState {
  pub fn new(service: DictionaryService, journal: RequestJournal) -> Self {
    Self { service: Arc::new(service), journal }
  }
}
