//! Definition endpoint handler

use axum::{
  extract::{Extension, Json, State},
  response::Json as ResponseJson,
};

use crate::error::DictionaryError;
use crate::lists::DefinitionResult;
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{ApiResult, DefineRequest};

/// POST /define - Define a word, avoiding the learner's unknown words
pub async fn define(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Json(request): Json<DefineRequest>,
) -> ApiResult<ResponseJson<DefinitionResult>> {
  let word = request.word.as_deref().unwrap_or_default();

  match state.service.define(word, &request.unknown_words).await {
    Ok(result) => {
      context.log_info(&format!("Defined '{}'", result.term), "define-api").await;
      Ok(ResponseJson(result))
    }
    Err(e) => {
      match &e {
        DictionaryError::Validation(_) | DictionaryError::NotFound(_) => {
          context.log_warn(&format!("Rejected definition request: {e}"), "define-api").await
        }
        _ => context.log_error(&format!("Definition failed: {e}"), "define-api").await,
      }
      Err(e.into())
    }
  }
}
