//! End-to-end tests for the HTTP surface, driven in-process

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
  body::{to_bytes, Body},
  http::{Method, Request, StatusCode},
  Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use webster::config::{Config, StorageConfig};
use webster::journal::RequestJournal;
use webster::prompt::PromptTemplate;
use webster::server::routing::create_router;
use webster::server::services::completion::Completer;
use webster::server::services::ledger::{AvoidListStrategy, UnknownWordLedger};
use webster::server::services::store::MemoryStore;
use webster::server::startup::build_state;
use webster::server::state::{AppState, DictionaryService, ServiceOptions};

/// Completer that answers with a fixed text and remembers every prompt
#[derive(Default)]
struct FakeCompleter {
  answer: Option<String>,
  prompts: Mutex<Vec<String>>,
}

impl FakeCompleter {
  fn answering(answer: &str) -> Self {
    Self { answer: Some(answer.to_string()), prompts: Mutex::default() }
  }

  fn failing() -> Self {
    Self::default()
  }

  fn prompts(&self) -> Vec<String> {
    self.prompts.lock().unwrap().clone()
  }
}

#[async_trait]
impl Completer for FakeCompleter {
  async fn complete(&self, prompt: &str) -> Result<String> {
    self.prompts.lock().unwrap().push(prompt.to_string());
    self.answer.clone().ok_or_else(|| anyhow!("upstream returned 503"))
  }
}

/// Completer that never answers in time
struct SlowCompleter;

#[async_trait]
impl Completer for SlowCompleter {
  async fn complete(&self, _prompt: &str) -> Result<String> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Ok("too late".to_string())
  }
}

struct TestApp {
  router: Router,
  completer: Arc<FakeCompleter>,
  _temp: TempDir,
}

fn test_config(temp: &TempDir) -> Config {
  Config {
    storage: StorageConfig::Memory,
    journal_path: Some(temp.path().join("server.logs.jsonl")),
    ..Config::default()
  }
}

fn app_with(completer: FakeCompleter, configure: impl FnOnce(&mut Config)) -> TestApp {
  let temp = TempDir::new().unwrap();
  let mut config = test_config(&temp);
  configure(&mut config);

  let completer = Arc::new(completer);
  let state = build_state(&config, completer.clone()).unwrap();

  TestApp { router: create_router(state), completer, _temp: temp }
}

fn app(answer: &str) -> TestApp {
  app_with(FakeCompleter::answering(answer), |_| {})
}

async fn send(
  router: &Router,
  method: Method,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(value) => {
      builder = builder.header("content-type", "application/json");
      Body::from(value.to_string())
    }
    None => Body::empty(),
  };

  let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, value)
}

async fn define(router: &Router, body: Value) -> (StatusCode, Value) {
  send(router, Method::POST, "/define", Some(body)).await
}

fn terms(list: &Value) -> Vec<String> {
  list.as_array().unwrap().iter().map(|entry| entry["term"].as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_learner_round_trip() {
  let app = app("**\"To combine parts into a whole.\"**");
  let router = &app.router;

  let (status, defined) =
    send(router, Method::POST, "/define", Some(json!({ "word": "integrate" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(defined["term"], "integrate");
  assert_eq!(defined["definition"], "To combine parts into a whole.");

  let (_, history) = send(router, Method::GET, "/history", None).await;
  assert_eq!(terms(&history)[0], "integrate");

  let word = json!({ "term": "integrate", "definition": defined["definition"] });

  let (status, favorite) = send(router, Method::POST, "/favorites", Some(word.clone())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(favorite["isFavorite"], true);
  assert_eq!(favorite["message"], "Word added to favorites");
  let (_, favorites) = send(router, Method::GET, "/favorites", None).await;
  assert_eq!(terms(&favorites), vec!["integrate"]);

  let (status, _) = send(router, Method::POST, "/vocabulary", Some(word.clone())).await;
  assert_eq!(status, StatusCode::CREATED);
  let (_, vocabulary) = send(router, Method::GET, "/vocabulary", None).await;
  assert_eq!(terms(&vocabulary), vec!["integrate"]);

  let (status, _) = send(router, Method::DELETE, "/vocabulary/integrate", None).await;
  assert_eq!(status, StatusCode::OK);
  let (_, vocabulary) = send(router, Method::GET, "/vocabulary", None).await;
  assert!(terms(&vocabulary).is_empty());

  let (_, favorite) = send(router, Method::POST, "/favorites", Some(word)).await;
  assert_eq!(favorite["isFavorite"], false);
  assert_eq!(favorite["message"], "Word removed from favorites");
  let (_, favorites) = send(router, Method::GET, "/favorites", None).await;
  assert!(terms(&favorites).is_empty());

  let (status, cleared) = send(router, Method::DELETE, "/history", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(cleared["message"], "Search history cleared");
  let (_, history) = send(router, Method::GET, "/history", None).await;
  assert!(terms(&history).is_empty());
}

#[tokio::test]
async fn test_timestamps_use_millisecond_utc_format() {
  let app = app("To join.");
  let (_, defined) =
    send(&app.router, Method::POST, "/define", Some(json!({ "word": "integrate" }))).await;

  let timestamp = defined["timestamp"].as_str().unwrap();
  assert!(timestamp.ends_with('Z'));
  let fraction = timestamp.rsplit('.').next().unwrap();
  assert_eq!(fraction.len(), "123Z".len());
}

#[tokio::test]
async fn test_missing_fields_are_bad_requests() {
  let app = app("To join.");
  let router = &app.router;

  let (status, body) = send(router, Method::POST, "/define", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation_error");
  assert!(body["transactionId"].is_string());

  let (status, _) =
    send(router, Method::POST, "/favorites", Some(json!({ "term": "integrate" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) =
    send(router, Method::POST, "/vocabulary", Some(json!({ "definition": "To join." }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  assert!(app.completer.prompts().is_empty());
}

#[tokio::test]
async fn test_code_like_words_are_rejected() {
  let app = app("To join.");

  let (status, body) =
    send(&app.router, Method::POST, "/define", Some(json!({ "word": "getUserData" }))).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation_error");
  assert!(app.completer.prompts().is_empty());
}

#[tokio::test]
async fn test_vocabulary_duplicates_and_missing_terms() {
  let app = app("To join.");
  let router = &app.router;
  let word = json!({ "term": "integrate", "definition": "To join." });

  let (status, _) = send(router, Method::POST, "/vocabulary", Some(word.clone())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) = send(router, Method::POST, "/vocabulary", Some(word)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["word"]["term"], "integrate");

  let (status, body) = send(router, Method::DELETE, "/vocabulary/absent", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_unknown_words_accumulate_per_term() {
  let app = app("To join.");
  let router = &app.router;

  define(router, json!({ "word": "integrate", "unknownWords": ["a", "b"] })).await;
  define(router, json!({ "word": "integrate", "avoidWords": ["c"] })).await;
  define(router, json!({ "word": "merge", "unknownWords": ["z"] })).await;

  let prompts = app.completer.prompts();
  assert!(prompts[1].contains("a, b, c"));
  assert!(prompts[2].contains(": z. "));
  assert!(!prompts[2].contains("a, b"));

  let (status, words) = send(router, Method::GET, "/unknown-words", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(words, json!(["a", "b", "c", "z"]));
}

#[tokio::test]
async fn test_global_strategy_shares_unknown_words() {
  let app = app_with(FakeCompleter::answering("To join."), |config| {
    config.avoid_list_strategy = AvoidListStrategy::Global;
  });
  let router = &app.router;

  define(router, json!({ "word": "integrate", "unknownWords": ["whole"] })).await;
  define(router, json!({ "word": "merge" })).await;

  assert!(app.completer.prompts()[1].contains("whole"));
}

#[tokio::test]
async fn test_clearing_history_keeps_ledger_unless_configured() {
  let app = app("To join.");
  let router = &app.router;
  define(router, json!({ "word": "integrate", "unknownWords": ["whole"] })).await;

  send(router, Method::DELETE, "/history", None).await;
  let (_, words) = send(router, Method::GET, "/unknown-words", None).await;
  assert_eq!(words, json!(["whole"]));

  let (status, _) = send(router, Method::DELETE, "/unknown-words", None).await;
  assert_eq!(status, StatusCode::OK);
  let (_, words) = send(router, Method::GET, "/unknown-words", None).await;
  assert_eq!(words, json!([]));

  let coupled = app_with(FakeCompleter::answering("To join."), |config| {
    config.clear_history_clears_ledger = true;
  });
  send(
    &coupled.router,
    Method::POST,
    "/define",
    Some(json!({ "word": "integrate", "unknownWords": ["whole"] })),
  )
  .await;
  send(&coupled.router, Method::DELETE, "/history", None).await;
  let (_, words) = send(&coupled.router, Method::GET, "/unknown-words", None).await;
  assert_eq!(words, json!([]));
}

#[tokio::test]
async fn test_failed_completion_is_server_error_but_ledger_grows() {
  let app = app_with(FakeCompleter::failing(), |_| {});
  let router = &app.router;

  let (status, body) = send(
    router,
    Method::POST,
    "/define",
    Some(json!({ "word": "integrate", "unknownWords": ["whole"] })),
  )
  .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["error"], "completion_error");
  assert!(body["message"].as_str().unwrap().contains("upstream returned 503"));

  let (_, words) = send(router, Method::GET, "/unknown-words", None).await;
  assert_eq!(words, json!(["whole"]));
  let (_, history) = send(router, Method::GET, "/history", None).await;
  assert!(terms(&history).is_empty());
}

#[tokio::test]
async fn test_slow_completion_times_out() {
  let temp = TempDir::new().unwrap();
  let store = Arc::new(MemoryStore::new());
  let ledger = UnknownWordLedger::new(store, PromptTemplate::default());
  let options =
    ServiceOptions { completion_timeout: Duration::from_millis(50), ..ServiceOptions::default() };
  let service = DictionaryService::new(ledger, Arc::new(SlowCompleter), options);
  let journal = RequestJournal::open(temp.path().join("server.logs.jsonl")).unwrap();
  let router = create_router(AppState::new(service, journal));

  let (status, body) =
    send(&router, Method::POST, "/define", Some(json!({ "word": "integrate" }))).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["error"], "completion_error");
  assert!(body["message"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_routes_are_served_under_api_prefix() {
  let app = app("To join.");
  let router = &app.router;

  let (status, defined) = send(
    router,
    Method::POST,
    "/api/dictionary/define",
    Some(json!({ "word": "integrate" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(defined["term"], "integrate");

  let (_, history) = send(router, Method::GET, "/history", None).await;
  assert_eq!(terms(&history), vec!["integrate"]);
  let (_, prefixed) = send(router, Method::GET, "/api/dictionary/history", None).await;
  assert_eq!(prefixed, history);
}

#[tokio::test]
async fn test_status_endpoints() {
  let app = app("To join.");
  let router = &app.router;

  let (status, health) = send(router, Method::GET, "/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(health, json!({ "status": "ok" }));

  let (_, status_body) = send(router, Method::GET, "/status", None).await;
  assert_eq!(status_body["storage"], "memory");
  assert_eq!(status_body["avoidListStrategy"], "per_term");
  assert_eq!(status_body["version"], env!("CARGO_PKG_VERSION"));

  let (_, version) = send(router, Method::GET, "/version", None).await;
  assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));

  let (_, info) = send(router, Method::GET, "/api", None).await;
  assert!(info["definition_schema"]["properties"]["term"].is_object());
}

#[tokio::test]
async fn test_requests_are_journaled() {
  let app = app("To join.");
  let router = &app.router;

  send(router, Method::POST, "/define", Some(json!({}))).await;

  let (status, body) = send(router, Method::GET, "/logs?limit=10&level=warn", None).await;
  assert_eq!(status, StatusCode::OK);

  let logs = body["logs"].as_array().unwrap();
  assert!(!logs.is_empty());
  assert!(logs.iter().all(|entry| entry["level"] == "warn"));
  assert!(logs.iter().any(|entry| {
    entry["message"] == "Request completed"
      && entry["context"]["path"] == "/define"
      && entry["context"]["status_code"] == 400
  }));

  let (_, all) = send(router, Method::GET, "/logs?limit=2", None).await;
  assert_eq!(all["logs"].as_array().unwrap().len(), 2);
}
