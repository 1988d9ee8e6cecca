//! Post-processing of raw model output into a single plain-text line

use once_cell::sync::Lazy;
use regex::Regex;

/// Substitutions applied in order; later rules see the output of earlier ones.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
  [
    (r"\*\*", ""),
    (r"\*(.*?)\*", "$1"),
    (r"_(.*?)_", "$1"),
    (r"`(.*?)`", "$1"),
    (r"```[\s\S]*?```", ""),
    (r"#{1,6}\s", ""),
    (r"\[(.*?)\]\(.*?\)", "$1"),
    (r#"["'](.*?)["']"#, "$1"),
    (r"\n", " "),
    (r"\s+", " "),
  ]
  .into_iter()
  .map(|(pattern, replacement)| {
    (Regex::new(pattern).expect("markdown rules are valid regular expressions"), replacement)
  })
  .collect()
});

/// Strip markdown, quoting and line breaks from a model completion.
pub fn strip_markdown(text: &str) -> String {
  let stripped = RULES.iter().fold(text.to_string(), |acc, (pattern, replacement)| {
    pattern.replace_all(&acc, *replacement).into_owned()
  });

  stripped.trim().to_string()
}
