use anyhow::Result;
use clap::{Parser, Subcommand};
use webster::cli::{client::get_client, commands};

#[derive(Parser)]
#[command(name = "webster")]
#[command(about = "Webster - Learner's Dictionary
One-sentence definitions that avoid the words you don't know yet")]
#[command(version)]
struct Cli {
  /// Server base URL (defaults to $WEBSTER_SERVER_URL or http://localhost:3000)
  #[arg(long, global = true)]
  server: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Define a word or phrase
  Define {
    /// Word or phrase to define
    #[arg(required = true)]
    word: Vec<String>,
    /// Word you don't know, to keep out of the definition (repeatable)
    #[arg(short, long = "unknown")]
    unknown: Vec<String>,
  },
  /// Check locally whether text looks like a word rather than code or a URL
  Check {
    #[arg(required = true)]
    text: Vec<String>,
  },
  /// Show recent lookups
  History,
  /// Forget recent lookups
  ClearHistory,
  /// Toggle a word in favorites
  Favorite {
    term: String,
    /// Definition to store; looked up when omitted
    #[arg(short, long)]
    definition: Option<String>,
  },
  /// List favorites
  Favorites,
  /// Manage the vocabulary list
  Vocab {
    #[command(subcommand)]
    command: VocabCommand,
  },
  /// List every recorded unknown word
  UnknownWords,
  /// Forget every recorded unknown word
  ClearUnknownWords,
  /// Show server status
  Status,
  /// Query server logs for debugging and monitoring
  Logs {
    /// Maximum number of log entries to return
    #[arg(short, long, default_value = "50")]
    limit: usize,
    /// Filter by log level (info, warn, error, all)
    #[arg(long, default_value = "all")]
    level: String,
  },
}

#[derive(Subcommand)]
enum VocabCommand {
  /// Add a word
  Add {
    term: String,
    /// Definition to store; looked up when omitted
    #[arg(short, long)]
    definition: Option<String>,
  },
  /// List the vocabulary
  List,
  /// Remove a word
  Remove { term: String },
}

async fn handle(server: Option<&str>, command: Command) -> Result<()> {
  if let Command::Check { text } = &command {
    return commands::check(&text.join(" "));
  }

  let client = get_client(server)?;

  match command {
    Command::Define { word, unknown } => commands::define(&client, &word.join(" "), &unknown).await,
    Command::Check { .. } => Ok(()),
    Command::History => commands::history(&client).await,
    Command::ClearHistory => commands::clear_history(&client).await,
    Command::Favorite { term, definition } => {
      commands::favorite(&client, &term, definition.as_deref()).await
    }
    Command::Favorites => commands::favorites(&client).await,
    Command::Vocab { command } => match command {
      VocabCommand::Add { term, definition } => {
        commands::vocab_add(&client, &term, definition.as_deref()).await
      }
      VocabCommand::List => commands::vocab_list(&client).await,
      VocabCommand::Remove { term } => commands::vocab_remove(&client, &term).await,
    },
    Command::UnknownWords => commands::unknown_words(&client).await,
    Command::ClearUnknownWords => commands::clear_unknown_words(&client).await,
    Command::Status => commands::status(&client).await,
    Command::Logs { limit, level } => commands::logs(&client, limit, &level).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  handle(cli.server.as_deref(), cli.command).await
}
