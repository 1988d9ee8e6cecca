use anyhow::{bail, Result};
use colored::*;

use crate::classifier::is_valid_lookup_candidate;
use crate::cli::client::WebsterClient;
use crate::cli::display::{display_definition, display_log_entry, display_word_list};
use crate::server::types::AddVocabularyResponse;

/// Define a word through the server
pub async fn define(client: &WebsterClient, word: &str, unknown_words: &[String]) -> Result<()> {
  let result = client.define(word, unknown_words).await?;
  display_definition(&result);
  Ok(())
}

/// Classify text locally without contacting the server
pub fn check(text: &str) -> Result<()> {
  if is_valid_lookup_candidate(text) {
    println!("{} '{}' looks like an English word or phrase", "✓".green(), text.trim());
    Ok(())
  } else {
    bail!("'{}' does not look like an English word or phrase", text.trim())
  }
}

pub async fn history(client: &WebsterClient) -> Result<()> {
  let results = client.history().await?;
  display_word_list("History", &results, "No lookups yet.");
  Ok(())
}

pub async fn clear_history(client: &WebsterClient) -> Result<()> {
  let response = client.clear_history().await?;
  println!("{} {}", "✓".green(), response.message);
  Ok(())
}

/// Toggle a favorite, defining the word first when no definition is given
pub async fn favorite(client: &WebsterClient, term: &str, definition: Option<&str>) -> Result<()> {
  let definition = match definition {
    Some(definition) => definition.to_string(),
    None => client.define(term, &[]).await?.definition,
  };

  let response = client.toggle_favorite(term, &definition).await?;
  let marker = if response.is_favorite { "★".yellow() } else { "☆".dimmed() };
  println!("{} {} ({})", marker, response.message, term.cyan());
  Ok(())
}

pub async fn favorites(client: &WebsterClient) -> Result<()> {
  let results = client.favorites().await?;
  display_word_list("Favorites", &results, "No favorites yet.");
  Ok(())
}

/// Add a word to the vocabulary list, defining it first when no definition is given
pub async fn vocab_add(client: &WebsterClient, term: &str, definition: Option<&str>) -> Result<()> {
  let definition = match definition {
    Some(definition) => definition.to_string(),
    None => client.define(term, &[]).await?.definition,
  };

  match client.add_vocabulary(term, &definition).await? {
    AddVocabularyResponse::Created(word) => {
      println!("{} Added {} to vocabulary", "✓".green(), word.term.cyan())
    }
    AddVocabularyResponse::AlreadyPresent { message, word } => {
      println!("{} {} ({})", "•".yellow(), message, word.term.cyan())
    }
  }
  Ok(())
}

pub async fn vocab_list(client: &WebsterClient) -> Result<()> {
  let results = client.vocabulary().await?;
  display_word_list("Vocabulary", &results, "Vocabulary is empty.");
  Ok(())
}

pub async fn vocab_remove(client: &WebsterClient, term: &str) -> Result<()> {
  let response = client.remove_vocabulary(term).await?;
  println!("{} {} ({})", "✓".green(), response.message, term.cyan());
  Ok(())
}

pub async fn unknown_words(client: &WebsterClient) -> Result<()> {
  let words = client.unknown_words().await?;
  if words.is_empty() {
    println!("{}", "No unknown words recorded.".dimmed());
  } else {
    println!("{} ({})", "Unknown words".blue().bold(), words.len());
    println!("  {}", words.join(", "));
  }
  Ok(())
}

pub async fn clear_unknown_words(client: &WebsterClient) -> Result<()> {
  let response = client.clear_unknown_words().await?;
  println!("{} {}", "✓".green(), response.message);
  Ok(())
}

pub async fn status(client: &WebsterClient) -> Result<()> {
  let status = client.status().await?;
  println!("{} {} at {}", "Webster".bold(), status.version, client.base_url());
  println!("  status:   {}", status.status.green());
  println!("  storage:  {}", status.storage);
  println!("  strategy: {}", status.avoid_list_strategy);
  println!("  history:  {} entries", status.history_size);
  Ok(())
}

/// Show recent server journal entries
pub async fn logs(client: &WebsterClient, limit: usize, level: &str) -> Result<()> {
  let response = client.logs(limit, level).await?;

  if response.logs.is_empty() {
    println!("{}", "No log entries found.".dimmed());
    return Ok(());
  }

  for entry in &response.logs {
    display_log_entry(entry);
  }
  Ok(())
}
