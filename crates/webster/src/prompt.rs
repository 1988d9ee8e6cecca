//! Definition prompt construction
//!
//! The prompt is built from three configurable pieces. The unknown-words
//! clause is only included when the learner has flagged at least one word.
//! Recognised slots are `{term}` and `{unknown_words_joined}`.

use serde::{Deserialize, Serialize};

pub const TERM_SLOT: &str = "{term}";
pub const UNKNOWN_WORDS_SLOT: &str = "{unknown_words_joined}";

/// Everything the template needs to render a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParams<'a> {
  pub term: &'a str,
  pub unknown_words: &'a [String],
}

/// Template pieces for the definition request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
  /// Opening instruction, should mention `{term}`
  #[serde(default = "default_base")]
  pub base: String,
  /// Appended when unknown words exist, should mention `{unknown_words_joined}`
  #[serde(default = "default_unknown_words_clause")]
  pub unknown_words_clause: String,
  /// Style constraints appended last
  #[serde(default = "default_closing")]
  pub closing: String,
}

fn default_base() -> String {
  "Define the English word '{term}' in one clear, concise sentence of explanation. ".to_string()
}

fn default_unknown_words_clause() -> String {
  "The learner does not know these words, so do not use them or assume familiarity with them: \
   {unknown_words_joined}. "
    .to_string()
}

fn default_closing() -> String {
  "The explanation should be suitable for English language learners and avoid overly complex \
   vocabulary unless necessary. Answer in plain English only, with no translations, no \
   parenthetical comments and no markdown formatting."
    .to_string()
}

impl Default for PromptTemplate {
  fn default() -> Self {
    Self {
      base: default_base(),
      unknown_words_clause: default_unknown_words_clause(),
      closing: default_closing(),
    }
  }
}

impl PromptTemplate {
  /// Render the prompt for a term and its unknown words
  pub fn render(&self, params: &PromptParams<'_>) -> String {
    let mut prompt = self.base.replace(TERM_SLOT, params.term);

    if !params.unknown_words.is_empty() {
      let joined = params.unknown_words.join(", ");
      let clause = self
        .unknown_words_clause
        .replace(TERM_SLOT, params.term)
        .replace(UNKNOWN_WORDS_SLOT, &joined);
      prompt.push_str(&clause);
    }

    prompt.push_str(&self.closing.replace(TERM_SLOT, params.term));
    prompt
  }
}
