//! Health, status and version endpoint handlers

use axum::{extract::State, response::Json};

use crate::lists::DefinitionResult;
use crate::server::routing::API_PREFIX;
use crate::server::state::AppState;
use crate::server::types::{ApiInfoResponse, HealthResponse, StatusResponse, VersionResponse};

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse { status: "ok".to_string() })
}

/// GET /status - Version plus the active storage and strategy
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  let service = &state.service;

  Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    storage: service.storage_description(),
    avoid_list_strategy: service.strategy().to_string(),
    validate_terms: service.options().validate_terms,
    history_size: service.history().await.len(),
  })
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
  Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() })
}

/// GET /api - Version, route prefixes and the definition schema
pub async fn api_info() -> Json<ApiInfoResponse> {
  let schema = schemars::schema_for!(DefinitionResult);

  Json(ApiInfoResponse {
    version: env!("CARGO_PKG_VERSION").to_string(),
    prefixes: vec!["/".to_string(), API_PREFIX.to_string()],
    definition_schema: serde_json::to_value(schema).unwrap_or_default(),
  })
}
