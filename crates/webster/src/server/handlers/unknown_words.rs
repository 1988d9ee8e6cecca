//! Unknown-word ledger endpoint handlers

use axum::{
  extract::{Extension, State},
  response::Json as ResponseJson,
};

use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{ApiResult, MessageResponse};

/// GET /unknown-words - Every recorded unknown word, deduplicated
pub async fn list_unknown_words(
  State(state): State<AppState>,
) -> ApiResult<ResponseJson<Vec<String>>> {
  Ok(ResponseJson(state.service.unknown_words().await?))
}

/// DELETE /unknown-words - Wipe the ledger
pub async fn clear_unknown_words(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<ResponseJson<MessageResponse>> {
  if let Err(e) = state.service.clear_unknown_words().await {
    context.log_error(&format!("Failed to clear unknown words: {e}"), "unknown-words-api").await;
    return Err(e.into());
  }

  context.log_info("Unknown-word ledger cleared", "unknown-words-api").await;
  Ok(ResponseJson(MessageResponse::new("Unknown words cleared")))
}
