//! JSON REST API for Tabiya.
//!
//! Exposes an axum [`Router`] backed by any [`tabiya_core::store::GameStore`]
//! plus the Chess.com archive client. Auth, TLS, and transport concerns are
//! the caller's responsibility.

pub mod error;
pub mod games;
pub mod ingest;
pub mod openings;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post},
};
use serde::Deserialize;
use tabiya_core::store::GameStore;
use tabiya_fetch::ChessComClient;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Storage implementations the server can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  #[default]
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and the
/// `TABIYA_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:              String,
  #[serde(default = "default_port")]
  pub port:              u16,
  #[serde(default = "default_store_path")]
  pub store_path:        PathBuf,
  #[serde(default = "default_upstream")]
  pub upstream_base_url: String,
  #[serde(default)]
  pub backend:           StorageBackend,
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  8106
}

fn default_store_path() -> PathBuf {
  PathBuf::from("tabiya.db")
}

fn default_upstream() -> String {
  tabiya_fetch::DEFAULT_BASE_URL.to_owned()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: GameStore> {
  pub store:   Arc<S>,
  pub archive: Arc<ChessComClient>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: GameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(service_meta))
    // Queries
    .route("/games", get(games::list::<S>))
    .route("/games/wins", get(games::wins::<S>))
    .route("/games/losses", get(games::losses::<S>))
    .route("/games/draws", get(games::draws::<S>))
    .route("/games/{id}", get(games::get_one::<S>))
    // Classification
    .route("/openings/classify", get(openings::classify))
    // Fetch + ingest
    .route("/archive/{username}/{year}/{month}", get(ingest::fetch_month::<S>))
    .route("/ingest/{username}/{year}/{month}", post(ingest::ingest_month::<S>))
    .route("/ingest/{username}", post(ingest::backfill::<S>))
    .with_state(state)
}

/// `GET /` — service metadata.
async fn service_meta() -> Json<serde_json::Value> {
  Json(serde_json::json!({ "ok": true, "service": "tabiya" }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
