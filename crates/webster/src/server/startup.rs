//! REST server startup and configuration

use anyhow::{Context, Result};
use axum::serve;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::journal::RequestJournal;
use crate::server::routing::create_router;
use crate::server::services::completion::{Completer, DeepSeekClient};
use crate::server::services::ledger::UnknownWordLedger;
use crate::server::services::store::open_store;
use crate::server::state::{AppState, DictionaryService, ServiceOptions};

const COMPONENT: &str = "webster-server";

/// Assemble the service and journal described by `config`
pub fn build_state(config: &Config, completer: Arc<dyn Completer>) -> Result<AppState> {
  let store = open_store(&config.storage).context("Failed to open unknown-word store")?;

  let ledger = UnknownWordLedger::new(store, config.prompt.clone())
    .with_strategy(config.avoid_list_strategy)
    .with_atomic_merge(config.atomic_merge);

  let service = DictionaryService::new(ledger, completer, ServiceOptions::from_config(config));

  let journal_path = config.journal_path();
  let journal = RequestJournal::open(&journal_path)
    .with_context(|| format!("Failed to open request journal {}", journal_path.display()))?;

  Ok(AppState::new(service, journal))
}

/// Start the REST server and run until Ctrl-C
pub async fn start_server(config: Config) -> Result<()> {
  let completer = Arc::new(DeepSeekClient::from_config(&config.llm)?);
  let state = build_state(&config, completer)?;
  let journal = state.journal.clone();

  journal
    .info(
      &format!(
        "Starting webster server on {} (storage: {}, strategy: {})",
        config.bind,
        state.service.storage_description(),
        config.avoid_list_strategy
      ),
      COMPONENT,
    )
    .await;

  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(config.bind)
    .await
    .with_context(|| format!("Failed to bind {}", config.bind))?;
  journal.info(&format!("Server listening on {}", config.bind), COMPONENT).await;

  match serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
    Ok(()) => {
      journal.info("Server shutdown gracefully", COMPONENT).await;
      Ok(())
    }
    Err(e) => {
      journal.error(&format!("Server error: {e}"), COMPONENT).await;
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!("Failed to listen for shutdown signal: {e}");
    std::future::pending::<()>().await;
  }
}
