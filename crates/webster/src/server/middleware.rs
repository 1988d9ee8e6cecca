//! Request context and middleware for the dictionary REST API
//!
//! Every request gets a `RequestContext` carrying a request id and the
//! shared journal. Handlers pick it up through `Extension`.

use axum::{
  extract::{Request, State},
  http::{HeaderMap, Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use uuid::Uuid;

use crate::journal::{EntryContext, RequestJournal};
use crate::server::state::AppState;

const COMPONENT: &str = "http-request";

/// Request metadata plus the journal handle
#[derive(Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub headers: HeaderMap,
  pub journal: RequestJournal,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, headers: HeaderMap, journal: RequestJournal) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, headers, journal }
  }

  fn entry_context(&self, status_code: Option<u16>, duration_ms: Option<f64>) -> EntryContext {
    EntryContext {
      request_id: Some(self.request_id.to_string()),
      method: Some(self.method.to_string()),
      path: Some(self.uri.path().to_string()),
      status_code,
      duration_ms,
    }
  }

  pub fn user_agent(&self) -> &str {
    self.headers.get("user-agent").and_then(|v| v.to_str().ok()).unwrap_or("none")
  }

  pub async fn log_info(&self, message: &str, component: &str) {
    self.journal.record("info", message, component, Some(self.entry_context(None, None))).await;
  }

  pub async fn log_warn(&self, message: &str, component: &str) {
    self.journal.record("warn", message, component, Some(self.entry_context(None, None))).await;
  }

  pub async fn log_error(&self, message: &str, component: &str) {
    self.journal.record("error", message, component, Some(self.entry_context(None, None))).await;
  }

  pub async fn log_request_start(&self) {
    let message = format!("Request started (User-Agent: {})", self.user_agent());
    self.journal.record("info", &message, COMPONENT, Some(self.entry_context(None, None))).await;
  }

  /// Server faults are journaled as errors, client faults as warnings
  pub async fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    let level = if status_code >= 500 {
      "error"
    } else if status_code >= 400 {
      "warn"
    } else {
      "info"
    };
    let context = self.entry_context(Some(status_code), Some(duration_ms));
    self.journal.record(level, "Request completed", COMPONENT, Some(context)).await;
  }
}

/// Inject a `RequestContext` and journal the start and end of each request
pub async fn request_context_middleware(
  State(state): State<AppState>,
  mut request: Request,
  next: Next,
) -> Response {
  let context = RequestContext::new(
    request.method().clone(),
    request.uri().clone(),
    request.headers().clone(),
    state.journal.clone(),
  );

  let start_time = Instant::now();
  context.log_request_start().await;

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms).await;

  response
}
