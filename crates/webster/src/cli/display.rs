//! Display formatting utilities for CLI output

use colored::*;

use crate::journal::JournalEntry;
use crate::lists::DefinitionResult;

const WRAP_WIDTH: usize = 76;

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current_line = String::new();

  for word in text.split_whitespace() {
    if current_line.is_empty() {
      current_line = word.to_string();
    } else if current_line.len() + 1 + word.len() <= width {
      current_line.push(' ');
      current_line.push_str(word);
    } else {
      lines.push(std::mem::take(&mut current_line));
      current_line = word.to_string();
    }
  }

  if !current_line.is_empty() {
    lines.push(current_line);
  }

  lines
}

/// Term in bold followed by its wrapped, indented definition
pub fn display_definition(result: &DefinitionResult) {
  println!("{}", result.term.cyan().bold());
  for line in wrap_text(&result.definition, WRAP_WIDTH) {
    println!("  {line}");
  }
}

/// Numbered list of results, or `empty_message` when there are none
pub fn display_word_list(title: &str, results: &[DefinitionResult], empty_message: &str) {
  if results.is_empty() {
    println!("{}", empty_message.dimmed());
    return;
  }

  println!("{} ({})", title.blue().bold(), results.len());
  for (index, result) in results.iter().enumerate() {
    let definition = wrap_text(&result.definition, WRAP_WIDTH - 6);
    let first = definition.first().map(String::as_str).unwrap_or_default();
    println!("{:>3}. {} - {}", index + 1, result.term.bold(), first);
    for line in definition.iter().skip(1) {
      println!("      {line}");
    }
  }
}

pub fn display_log_entry(entry: &JournalEntry) {
  let level = match entry.level.as_str() {
    "error" => entry.level.red().bold(),
    "warn" => entry.level.yellow().bold(),
    _ => entry.level.green(),
  };

  let mut line = format!(
    "{} {} [{}] {}",
    entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
    level,
    entry.component,
    entry.message
  );

  if let Some(context) = &entry.context {
    if let (Some(method), Some(path)) = (&context.method, &context.path) {
      line.push_str(&format!(" {method} {path}"));
    }
    if let Some(status) = context.status_code {
      line.push_str(&format!(" -> {status}"));
    }
    if let Some(duration) = context.duration_ms {
      line.push_str(&format!(" ({duration:.1}ms)"));
    }
  }

  println!("{line}");
}
