//! History, favorites and vocabulary endpoint handlers

use axum::{
  extract::{Extension, Json, Path, State},
  http::StatusCode,
  response::Json as ResponseJson,
};

use crate::lists::{DefinitionResult, VocabularyAdd};
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{
  AddVocabularyResponse, ApiResult, FavoriteResponse, MessageResponse, WordRequest,
};

// History
// =======

/// GET /history - Recent lookups, most recent first
pub async fn history(State(state): State<AppState>) -> ResponseJson<Vec<DefinitionResult>> {
  ResponseJson(state.service.history().await)
}

/// DELETE /history - Forget recent lookups
pub async fn clear_history(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<ResponseJson<MessageResponse>> {
  state.service.clear_history().await?;
  context.log_info("Search history cleared", "history-api").await;
  Ok(ResponseJson(MessageResponse::new("Search history cleared")))
}

// Favorites
// =========

/// POST /favorites - Toggle a favorite
pub async fn toggle_favorite(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Json(request): Json<WordRequest>,
) -> ApiResult<ResponseJson<FavoriteResponse>> {
  let is_favorite =
    state.service.toggle_favorite(request.term.as_deref(), request.definition.as_deref()).await?;

  let message = if is_favorite { "Word added to favorites" } else { "Word removed from favorites" };
  context.log_info(message, "favorites-api").await;

  Ok(ResponseJson(FavoriteResponse { message: message.to_string(), is_favorite }))
}

/// GET /favorites
pub async fn favorites(State(state): State<AppState>) -> ResponseJson<Vec<DefinitionResult>> {
  ResponseJson(state.service.favorites().await)
}

// Vocabulary
// ==========

/// POST /vocabulary - 201 with the stored word, or 200 if it was already there
pub async fn add_vocabulary(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Json(request): Json<WordRequest>,
) -> ApiResult<(StatusCode, ResponseJson<AddVocabularyResponse>)> {
  let (outcome, word) =
    state.service.add_to_vocabulary(request.term.as_deref(), request.definition.as_deref()).await?;

  match outcome {
    VocabularyAdd::Added => {
      context.log_info(&format!("Added '{}' to vocabulary", word.term), "vocabulary-api").await;
      Ok((StatusCode::CREATED, ResponseJson(AddVocabularyResponse::Created(word))))
    }
    VocabularyAdd::AlreadyPresent => Ok((
      StatusCode::OK,
      ResponseJson(AddVocabularyResponse::AlreadyPresent {
        message: "Word already in vocabulary".to_string(),
        word,
      }),
    )),
  }
}

/// GET /vocabulary
pub async fn vocabulary(State(state): State<AppState>) -> ResponseJson<Vec<DefinitionResult>> {
  ResponseJson(state.service.vocabulary().await)
}

/// DELETE /vocabulary/{term}
pub async fn remove_vocabulary(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Path(term): Path<String>,
) -> ApiResult<ResponseJson<MessageResponse>> {
  match state.service.remove_from_vocabulary(&term).await {
    Ok(_) => {
      context.log_info(&format!("Removed '{term}' from vocabulary"), "vocabulary-api").await;
      Ok(ResponseJson(MessageResponse::new("Word removed from vocabulary")))
    }
    Err(e) => {
      context.log_warn(&format!("Cannot remove '{term}': {e}"), "vocabulary-api").await;
      Err(e.into())
    }
  }
}
