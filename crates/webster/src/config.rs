//! Configuration management for Webster
//!
//! Settings come from a JSON file (every field optional) and are then
//! overridden by command-line flags in the binaries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::lists::HISTORY_CAPACITY;
use crate::prompt::PromptTemplate;
use crate::server::services::ledger::AvoidListStrategy;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Server bind address
  #[serde(default = "default_bind")]
  pub bind: SocketAddr,
  /// Where unknown words are persisted
  #[serde(default)]
  pub storage: StorageConfig,
  /// Which unknown words reach the prompt
  #[serde(default)]
  pub avoid_list_strategy: AvoidListStrategy,
  /// Use the store's atomic set union instead of read-modify-write
  #[serde(default)]
  pub atomic_merge: bool,
  /// Reject `/define` terms that look like code or URLs
  #[serde(default = "default_validate_terms")]
  pub validate_terms: bool,
  /// Also wipe the unknown-word ledger when history is cleared
  #[serde(default)]
  pub clear_history_clears_ledger: bool,
  /// Maximum number of history entries
  #[serde(default = "default_history_capacity")]
  pub history_capacity: usize,
  /// Language model client settings
  #[serde(default)]
  pub llm: LlmConfig,
  /// Prompt template pieces
  #[serde(default)]
  pub prompt: PromptTemplate,
  /// Request journal location, defaults under the Webster root
  #[serde(default)]
  pub journal_path: Option<PathBuf>,
}

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
  Memory,
  File {
    #[serde(default = "default_store_path")]
    path: PathBuf,
  },
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig::File { path: default_store_path() }
  }
}

/// Completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default = "default_model")]
  pub model: String,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  #[serde(default = "default_max_tokens")]
  pub max_tokens: u32,
  /// Upper bound on a single completion, in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Name of the environment variable holding the API key
  #[serde(default = "default_api_key_env")]
  pub api_key_env: String,
}

impl Default for LlmConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      model: default_model(),
      temperature: default_temperature(),
      max_tokens: default_max_tokens(),
      timeout_secs: default_timeout_secs(),
      api_key_env: default_api_key_env(),
    }
  }
}

// Defaults
fn default_bind() -> SocketAddr {
  SocketAddr::from(([127, 0, 0, 1], 3000))
}
fn default_validate_terms() -> bool {
  true
}
fn default_history_capacity() -> usize {
  HISTORY_CAPACITY
}
fn default_store_path() -> PathBuf {
  webster_root().join("unknown_words.json")
}
fn default_base_url() -> String {
  "https://api.deepseek.com".to_string()
}
fn default_model() -> String {
  "deepseek-chat".to_string()
}
fn default_temperature() -> f32 {
  0.3
}
fn default_max_tokens() -> u32 {
  100
}
fn default_timeout_secs() -> u64 {
  30
}
fn default_api_key_env() -> String {
  "DEEPSEEK_API_KEY".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind: default_bind(),
      storage: StorageConfig::default(),
      avoid_list_strategy: AvoidListStrategy::default(),
      atomic_merge: false,
      validate_terms: default_validate_terms(),
      clear_history_clears_ledger: false,
      history_capacity: default_history_capacity(),
      llm: LlmConfig::default(),
      prompt: PromptTemplate::default(),
      journal_path: None,
    }
  }
}

/// Directory holding Webster's state, `$WEBSTER_ROOT` or `~/.webster`
pub fn webster_root() -> PathBuf {
  if let Ok(root) = std::env::var("WEBSTER_ROOT") {
    return PathBuf::from(root);
  }

  dirs::home_dir().unwrap_or_else(|| Path::new("/tmp").to_path_buf()).join(".webster")
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
      .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
  }

  /// Load from an explicit path, else the first config found on the search path, else defaults
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    for path in Self::search_paths() {
      if path.exists() {
        tracing::info!("Loading configuration from {}", path.display());
        return Self::load_from_file(&path);
      }
    }

    Ok(Self::default())
  }

  fn search_paths() -> Vec<PathBuf> {
    vec![
      PathBuf::from("webster.json"),
      PathBuf::from(".webster").join("config.json"),
      webster_root().join("config.json"),
    ]
  }

  /// Resolved request journal location
  pub fn journal_path(&self) -> PathBuf {
    self.journal_path.clone().unwrap_or_else(|| webster_root().join("server.logs.jsonl"))
  }
}
