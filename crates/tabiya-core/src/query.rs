//! The query engine: candidate rows → per-row derivation → combined filter →
//! pagination → projection.
//!
//! Storage-level filters (username substring, opening substring, ECO prefix,
//! ordering) are pushed down to the [`GameStore`]; filters that need derived
//! values (my color, my result, opening family) run here. Pagination is the
//! last step, applied after every filter.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  game::StoredGame,
  openings::{self, OpeningFamily},
  perspective::{self, Color, PovResult},
  store::{CandidateQuery, GameOrder, GameStore},
};

// ─── Filter & pagination ─────────────────────────────────────────────────────

/// The composable filter backing every query variant.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
  /// Case-insensitive substring match on the opening name.
  pub opening_like: Option<String>,
  /// Case-insensitive ECO code prefix, e.g. `"B9"`.
  pub eco_prefix:   Option<String>,
  /// Family label, compared case-insensitively against
  /// [`OpeningFamily::name`]. An unknown label matches nothing: the result
  /// is empty, not an error.
  pub family:       Option<String>,
  /// The requesting player's color.
  pub color:        Option<Color>,
  /// The result from the requesting player's point of view.
  pub result:       Option<PovResult>,
}

/// A window over the filtered, ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  usize,
  pub offset: usize,
}

impl Default for Page {
  fn default() -> Self {
    Self { limit: 50, offset: 0 }
  }
}

impl Page {
  pub const fn new(limit: usize, offset: usize) -> Self {
    Self { limit, offset }
  }

  /// The whole sequence, unwindowed.
  pub const fn unbounded() -> Self {
    Self { limit: usize::MAX, offset: 0 }
  }
}

// ─── GameView ────────────────────────────────────────────────────────────────

/// The projection returned by every query: stored columns plus the derived
/// per-player fields, computed fresh on each read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
  pub id:           i64,
  /// Not stored separately in this schema; available in the PGN if needed.
  pub date:         Option<NaiveDate>,
  pub white:        Option<String>,
  pub black:        Option<String>,
  pub my_color:     Option<Color>,
  pub pov_result:   Option<PovResult>,
  pub eco:          Option<String>,
  pub opening:      Option<String>,
  pub family:       OpeningFamily,
  pub time_control: Option<String>,
  pub end_time_utc: Option<i64>,
}

fn project(username: &str, game: &StoredGame) -> GameView {
  GameView {
    id:           game.id,
    date:         None,
    white:        game.white.clone(),
    black:        game.black.clone(),
    my_color:     perspective::resolve_color(username, game),
    pov_result:   perspective::resolve_pov(username, game),
    eco:          game.eco.clone(),
    opening:      game.opening.clone(),
    family:       openings::classify(game.eco.as_deref(), game.opening.as_deref()),
    time_control: game.time_control.clone(),
    end_time_utc: game.end_time_utc,
  }
}

/// Filters that need derived values, applied per candidate row.
fn passes_derived_filters(username: &str, game: &StoredGame, filter: &GameFilter) -> bool {
  if let Some(want) = filter.color
    && perspective::resolve_color(username, game) != Some(want)
  {
    return false;
  }
  if let Some(want) = filter.result
    && perspective::resolve_pov(username, game) != Some(want)
  {
    return false;
  }
  if let Some(want) = &filter.family {
    let family = openings::classify(game.eco.as_deref(), game.opening.as_deref());
    if !family.name().eq_ignore_ascii_case(want) {
      return false;
    }
  }
  true
}

/// Pure tail of the query pipeline: derived filters, then pagination, then
/// projection. Candidate order is preserved.
pub fn filter_page_project(
  username: &str,
  candidates: &[StoredGame],
  filter: &GameFilter,
  page: Page,
) -> Vec<GameView> {
  candidates
    .iter()
    .filter(|game| passes_derived_filters(username, game, filter))
    .skip(page.offset)
    .take(page.limit)
    .map(|game| project(username, game))
    .collect()
}

// ─── QueryService ────────────────────────────────────────────────────────────

/// Filtered, ordered, paginated views of one player's games over any
/// [`GameStore`].
///
/// Cheap to clone — the store handle is reference-counted.
#[derive(Debug)]
pub struct QueryService<S> {
  store: Arc<S>,
}

impl<S> Clone for QueryService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: GameStore> QueryService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Core query backing every variant: pull candidates (storage filters +
  /// ordering applied there), then derive, filter, paginate, and project.
  pub async fn games(
    &self,
    username: &str,
    filter: &GameFilter,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    let candidates = self
      .store
      .candidate_games(&CandidateQuery {
        username:     username.to_owned(),
        opening_like: filter.opening_like.clone(),
        eco_prefix:   filter.eco_prefix.clone(),
        order,
      })
      .await?;
    Ok(filter_page_project(username, &candidates, filter, page))
  }

  /// Games the player won, on top of any other filters.
  pub async fn wins(
    &self,
    username: &str,
    filter: &GameFilter,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    self.with_result(username, filter, PovResult::Win, order, page).await
  }

  /// Games the player lost, on top of any other filters.
  pub async fn losses(
    &self,
    username: &str,
    filter: &GameFilter,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    self.with_result(username, filter, PovResult::Loss, order, page).await
  }

  /// Games the player drew, on top of any other filters.
  pub async fn draws(
    &self,
    username: &str,
    filter: &GameFilter,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    self.with_result(username, filter, PovResult::Draw, order, page).await
  }

  /// Opening-centric variant with a `won` shorthand: `Some(true)` keeps
  /// wins, `Some(false)` keeps losses, `None` keeps everything.
  pub async fn games_by_opening(
    &self,
    username: &str,
    filter: &GameFilter,
    won: Option<bool>,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    match won {
      Some(true) => self.with_result(username, filter, PovResult::Win, order, page).await,
      Some(false) => self.with_result(username, filter, PovResult::Loss, order, page).await,
      None => self.games(username, filter, order, page).await,
    }
  }

  async fn with_result(
    &self,
    username: &str,
    filter: &GameFilter,
    result: PovResult,
    order: GameOrder,
    page: Page,
  ) -> Result<Vec<GameView>, S::Error> {
    let filter = GameFilter { result: Some(result), ..filter.clone() };
    self.games(username, &filter, order, page).await
  }
}
