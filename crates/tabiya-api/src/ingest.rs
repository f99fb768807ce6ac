//! Handlers for the fetch and ingest endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/archive/{username}/{year}/{month}` | Fetch upstream, no ingest |
//! | `POST` | `/ingest/{username}/{year}/{month}` | Fetch + store one month |
//! | `POST` | `/ingest/{username}` | Backfill every archive month |

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};
use tabiya_core::{NewGame, store::{GameStore, IngestReport}};
use tabiya_fetch::ArchiveMonth;

use crate::{AppState, error::ApiError};

fn archive_month(year: u16, month: u8) -> Result<ArchiveMonth, ApiError> {
  ArchiveMonth::new(year, month).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn store_err<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

/// `GET /archive/{username}/{year}/{month}` — pass the upstream month
/// through without touching the store.
pub async fn fetch_month<S>(
  State(state): State<AppState<S>>,
  Path((username, year, month)): Path<(String, u16, u8)>,
) -> Result<Json<Vec<NewGame>>, ApiError>
where
  S: GameStore,
{
  let month = archive_month(year, month)?;
  let games = state.archive.fetch_month(&username, month).await?;
  Ok(Json(games))
}

/// `POST /ingest/{username}/{year}/{month}` — fetch one month and store it,
/// answering with the ingest counts and the requested coordinates.
pub async fn ingest_month<S>(
  State(state): State<AppState<S>>,
  Path((username, year, month)): Path<(String, u16, u8)>,
) -> Result<Json<Value>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let month = archive_month(year, month)?;
  let games = state.archive.fetch_month(&username, month).await?;
  let report = state.store.ingest_games(games).await.map_err(store_err)?;

  tracing::info!(
    username = %username,
    archive = %month,
    inserted = report.inserted,
    skipped = report.skipped,
    "ingested monthly archive",
  );

  Ok(Json(json!({
    "inserted": report.inserted,
    "skipped":  report.skipped,
    "username": username,
    "year":     month.year(),
    "month":    month.month(),
  })))
}

/// `POST /ingest/{username}` — list every archive month the player has and
/// ingest each one, aggregating the counts.
pub async fn backfill<S>(
  State(state): State<AppState<S>>,
  Path(username): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let months = state.archive.list_archives(&username).await?;
  let mut report = IngestReport::default();
  for month in &months {
    let games = state.archive.fetch_month(&username, *month).await?;
    report.absorb(state.store.ingest_games(games).await.map_err(store_err)?);
  }

  tracing::info!(
    username = %username,
    months = months.len(),
    inserted = report.inserted,
    skipped = report.skipped,
    "backfilled archives",
  );

  Ok(Json(json!({
    "inserted": report.inserted,
    "skipped":  report.skipped,
    "username": username,
    "months":   months.len(),
  })))
}
