//! REST API module for the dictionary service
//!
//! Provides HTTP endpoints for definitions, word lists and the unknown-word
//! ledger. Uses axum for routing and schemars for response schemas.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod services;
pub mod startup;
pub mod state;
pub mod types;
