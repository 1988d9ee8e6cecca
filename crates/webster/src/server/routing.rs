//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{delete, get, post},
  Router,
};

use crate::server::handlers::{define, lists, logs, status, unknown_words};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// Prefix the desktop client uses for dictionary routes
pub const API_PREFIX: &str = "/api/dictionary";

/// Dictionary routes, served both at the root and under `API_PREFIX`
fn dictionary_routes() -> Router<AppState> {
  Router::new()
    .route("/define", post(define::define))
    // Word lists
    .route("/history", get(lists::history).delete(lists::clear_history))
    .route("/favorites", get(lists::favorites).post(lists::toggle_favorite))
    .route("/vocabulary", get(lists::vocabulary).post(lists::add_vocabulary))
    .route("/vocabulary/{term}", delete(lists::remove_vocabulary))
    // Unknown-word ledger
    .route(
      "/unknown-words",
      get(unknown_words::list_unknown_words).delete(unknown_words::clear_unknown_words),
    )
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status and version endpoints
    .route("/health", get(status::health))
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    .route("/api", get(status::api_info))
    // Logs endpoint
    .route("/logs", get(logs::get_logs))
    .merge(dictionary_routes())
    .nest(API_PREFIX, dictionary_routes())
    .layer(middleware::from_fn_with_state(state.clone(), request_context_middleware))
    .with_state(state)
}
