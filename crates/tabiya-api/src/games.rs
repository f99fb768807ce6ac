//! Handlers for the `/games` query endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/games` | `?username=` required; all filters optional |
//! | `GET`  | `/games/wins` | Same, with the result pinned to `win` |
//! | `GET`  | `/games/losses` | Same, result pinned to `loss` |
//! | `GET`  | `/games/draws` | Same, result pinned to `draw` |
//! | `GET`  | `/games/{id}` | Single stored row; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use tabiya_core::{
  Color, GameFilter, GameView, Page, PovResult, QueryService, StoredGame,
  store::{GameOrder, GameStore, OrderDir, OrderField},
};

use crate::{AppState, error::ApiError};

/// Largest page a single request may ask for.
const MAX_LIMIT: usize = 200;

// ─── Query params ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GamesParams {
  /// The requesting player; filters and perspective derive from this name.
  pub username:     String,
  /// Substring match on the opening name.
  pub opening_like: Option<String>,
  /// ECO code prefix, e.g. `B9`.
  pub eco_prefix:   Option<String>,
  /// Opening family label, e.g. `Sicilian Defense`.
  pub family:       Option<String>,
  /// The requesting player's color.
  pub color:        Option<Color>,
  /// `win` | `loss` | `draw`, from the requesting player's point of view.
  pub result:       Option<PovResult>,
  pub limit:        Option<usize>,
  pub offset:       Option<usize>,
  /// `id` (default) or `end_time`.
  pub order_by:     Option<OrderField>,
  /// `asc` or `desc` (default).
  pub order_dir:    Option<OrderDir>,
}

impl GamesParams {
  fn filter(&self) -> GameFilter {
    GameFilter {
      opening_like: self.opening_like.clone(),
      eco_prefix:   self.eco_prefix.clone(),
      family:       self.family.clone(),
      color:        self.color,
      result:       self.result,
    }
  }

  fn order(&self) -> GameOrder {
    GameOrder {
      field: self.order_by.unwrap_or_default(),
      dir:   self.order_dir.unwrap_or_default(),
    }
  }

  fn page(&self) -> Page {
    Page {
      limit:  self.limit.unwrap_or(50).clamp(1, MAX_LIMIT),
      offset: self.offset.unwrap_or(0),
    }
  }
}

fn store_err<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /games?username=<name>[&opening_like=…][&eco_prefix=…][&family=…]
/// [&color=…][&result=…][&limit=…][&offset=…][&order_by=…][&order_dir=…]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GamesParams>,
) -> Result<Json<Vec<GameView>>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let views = QueryService::new(state.store.clone())
    .games(&params.username, &params.filter(), params.order(), params.page())
    .await
    .map_err(store_err)?;
  Ok(Json(views))
}

/// `GET /games/wins` — [`list`] with the result filter pinned to `win`.
pub async fn wins<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GamesParams>,
) -> Result<Json<Vec<GameView>>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let views = QueryService::new(state.store.clone())
    .wins(&params.username, &params.filter(), params.order(), params.page())
    .await
    .map_err(store_err)?;
  Ok(Json(views))
}

/// `GET /games/losses` — [`list`] with the result filter pinned to `loss`.
pub async fn losses<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GamesParams>,
) -> Result<Json<Vec<GameView>>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let views = QueryService::new(state.store.clone())
    .losses(&params.username, &params.filter(), params.order(), params.page())
    .await
    .map_err(store_err)?;
  Ok(Json(views))
}

/// `GET /games/draws` — [`list`] with the result filter pinned to `draw`.
pub async fn draws<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GamesParams>,
) -> Result<Json<Vec<GameView>>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let views = QueryService::new(state.store.clone())
    .draws(&params.username, &params.filter(), params.order(), params.page())
    .await
    .map_err(store_err)?;
  Ok(Json(views))
}

/// `GET /games/{id}` — one stored row, raw (no perspective attached).
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<StoredGame>, ApiError>
where
  S: GameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let game = state
    .store
    .get_game(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("game {id} not found")))?;
  Ok(Json(game))
}
