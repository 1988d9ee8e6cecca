//! Lookup candidate classification
//!
//! Decides whether a captured piece of text reads like English prose worth
//! sending to the dictionary, as opposed to a URL or a program identifier.

use once_cell::sync::Lazy;
use regex::Regex;

/// Compounds that look like camelCase but are ordinary English words
const CAMEL_CASE_WORDS: &[&str] =
  &["camelCase", "iPhone", "iPad", "iMac", "iPod", "eBay", "eMail", "eBook"];

const URL_PREFIXES: &[&str] = &["http://", "https://", "www."];

static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| compile(r"^[a-z]+[A-Z][a-zA-Z]*$"));
static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Z][a-z]+[A-Z][a-zA-Z]*$"));

// Letters with their combining marks, apostrophes and hyphens
static WORD_CHARS: Lazy<Regex> = Lazy::new(|| compile(r"^[\p{L}\p{M}'-]+$"));

// Any match marks the token as code
static CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
  [
    r"[a-zA-Z0-9_]+\([^)]*\)",
    r"^[a-zA-Z_][a-zA-Z0-9_]*$",
    r"^[A-Z][a-zA-Z0-9_]*$",
    r"^[a-z][a-zA-Z0-9_]*$",
    r"^[A-Z_][A-Z0-9_]*$",
    r"^[a-z_][a-z0-9_]*$",
    r"^[a-z]+[A-Z][a-zA-Z]*$",
    r"^[A-Z][a-z]+[A-Z][a-zA-Z]*$",
  ]
  .iter()
  .map(|pattern| compile(pattern))
  .collect()
});

fn compile(pattern: &str) -> Regex {
  Regex::new(pattern).expect("classifier patterns are valid regular expressions")
}

/// Returns true when `text` is plausible natural language for a lookup.
///
/// Every whitespace-separated token must pass; one code-like token rejects
/// the whole input.
pub fn is_valid_lookup_candidate(text: &str) -> bool {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return false;
  }

  if URL_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
    return false;
  }

  trimmed.split_whitespace().all(is_valid_token)
}

fn is_valid_token(token: &str) -> bool {
  if !WORD_CHARS.is_match(token) {
    return false;
  }

  if CAMEL_CASE_WORDS.contains(&token) {
    return true;
  }

  if !needs_code_check(token) {
    return true;
  }

  !CODE_PATTERNS.iter().any(|pattern| pattern.is_match(token))
}

fn needs_code_check(token: &str) -> bool {
  token.contains('_')
    || token.contains('(')
    || CAMEL_CASE.is_match(token)
    || PASCAL_CASE.is_match(token)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_words_are_valid() {
    for word in ["hello", "world", "don't", "well-being", "copy"] {
      assert!(is_valid_lookup_candidate(word), "{word} should be valid");
    }
  }

  #[test]
  fn test_accented_words_are_valid_in_either_normal_form() {
    // Precomposed, then base letters followed by U+0301
    for word in ["café", "résumé", "cafe\u{301}", "re\u{301}sume\u{301}", "nai\u{308}ve"] {
      assert!(is_valid_lookup_candidate(word), "{word:?} should be valid");
    }
    assert!(is_valid_lookup_candidate("cafe\u{301} au lait"));
  }

  #[test]
  fn test_letter_numbers_are_rejected() {
    for text in ["Ⅻ", "chapter Ⅻ", "\u{2160}"] {
      assert!(!is_valid_lookup_candidate(text), "{text:?} should be rejected");
    }
  }

  #[test]
  fn test_allow_listed_compounds_are_valid() {
    for word in CAMEL_CASE_WORDS {
      assert!(is_valid_lookup_candidate(word), "{word} should be valid");
    }
  }

  #[test]
  fn test_multi_word_phrases() {
    assert!(is_valid_lookup_candidate("hello world"));
    assert!(is_valid_lookup_candidate("don't worry"));
    assert!(is_valid_lookup_candidate("well-being matters"));
    assert!(!is_valid_lookup_candidate("hello userName"));
  }

  #[test]
  fn test_urls_are_rejected() {
    for url in [
      "http://example.com",
      "https://example.com",
      "www.example.com",
      "http://",
      "https://",
      "www.",
    ] {
      assert!(!is_valid_lookup_candidate(url), "{url} should be rejected");
    }
  }

  #[test]
  fn test_code_identifiers_are_rejected() {
    for code in [
      "getUserData",
      "processRequest",
      "userName",
      "UserProfile",
      "DataManager",
      "MAX_COUNT",
      "API_KEY",
      "user_name",
      "total_count",
      "_privateVar",
      "function()",
      "getData()",
      "processUser(user)",
    ] {
      assert!(!is_valid_lookup_candidate(code), "{code} should be rejected");
    }
  }

  #[test]
  fn test_invalid_characters_are_rejected() {
    for text in [
      "hello123",
      "AIDictionaryPackageTests.xctest",
      "user@example.com",
      "price$99",
      "hello.world",
      "hello_world",
      "hello+world",
    ] {
      assert!(!is_valid_lookup_candidate(text), "{text} should be rejected");
    }
  }

  #[test]
  fn test_surrounding_whitespace_is_ignored() {
    assert!(is_valid_lookup_candidate("  hello  "));
    assert!(is_valid_lookup_candidate("\thello\t"));
    assert!(is_valid_lookup_candidate("\nhello\n"));
    assert!(is_valid_lookup_candidate("  hello world  "));
  }

  #[test]
  fn test_blank_input_is_rejected() {
    for blank in ["", " ", "\t", "\n", "   "] {
      assert!(!is_valid_lookup_candidate(blank));
    }
  }

  #[test]
  fn test_punctuation_only_tokens_pass_character_check() {
    assert!(is_valid_lookup_candidate("-"));
    assert!(is_valid_lookup_candidate("'"));
  }

  #[test]
  fn test_all_caps_words_without_underscore_are_plain() {
    // No underscore, parenthesis, or mixed-case shape, so no pattern check
    assert!(is_valid_lookup_candidate("NASA"));
    assert!(is_valid_lookup_candidate("Hello"));
  }
}
