//! Logs endpoint handler

use axum::{
  extract::{Extension, Query, State},
  http::StatusCode,
  response::Json,
};

use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{ApiFailure, ApiResult, LogsQuery, LogsResponse};

const DEFAULT_LIMIT: usize = 50;

/// GET /logs?limit=N&level=L - Most recent journal entries, oldest first
pub async fn get_logs(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Query(query): Query<LogsQuery>,
) -> ApiResult<Json<LogsResponse>> {
  let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
  let level = query.level.as_deref().unwrap_or("all");

  match state.journal.entries(Some(limit), Some(level)).await {
    Ok(logs) => Ok(Json(LogsResponse { logs })),
    Err(e) => {
      context.log_error(&format!("Failed to read logs: {e}"), "logs-api").await;
      Err(ApiFailure::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "logs_read_failed",
        format!("Failed to read logs: {e}"),
      ))
    }
  }
}
