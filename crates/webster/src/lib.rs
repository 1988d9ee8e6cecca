//! Webster - Learner's Dictionary Service
//!
//! Looks up one-sentence definitions from a language model while steering
//! the model away from words the learner has already flagged as unknown.
//! Keeps history, favorites and vocabulary lists for the desktop client.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod journal;
pub mod lists;
pub mod markdown;
pub mod prompt;
pub mod server;
