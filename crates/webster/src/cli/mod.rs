//! Command-line client for the Webster server

pub mod client;
pub mod commands;
pub mod display;
