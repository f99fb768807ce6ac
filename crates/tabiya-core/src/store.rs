//! The `GameStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `tabiya-store-sqlite`).
//! Higher layers (`tabiya-api`, the query engine) depend on this
//! abstraction, not on any concrete backend. The store handle is constructed
//! by the composing application and injected; nothing in this crate owns a
//! global connection.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::game::{NewGame, StoredGame};

// ─── Ordering ────────────────────────────────────────────────────────────────

/// Column a candidate set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
  #[default]
  Id,
  EndTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDir {
  Asc,
  #[default]
  Desc,
}

/// Ordering applied by the store before any derived filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOrder {
  pub field: OrderField,
  pub dir:   OrderDir,
}

// ─── Candidate query ─────────────────────────────────────────────────────────

/// Parameters for [`GameStore::candidate_games`].
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
  /// Requesting player's name, matched as a case-insensitive substring of
  /// either player column. Looser than exact equality — "ann" also selects
  /// rows played by "annabelle" — so a candidate row alone is not proof the
  /// player took part; perspective resolution settles that downstream.
  pub username:     String,
  /// Case-insensitive substring filter on the opening-name column.
  pub opening_like: Option<String>,
  /// Case-insensitive prefix filter on the ECO column.
  pub eco_prefix:   Option<String>,
  pub order:        GameOrder,
}

// ─── Ingest results ──────────────────────────────────────────────────────────

/// What happened to one [`NewGame`] handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertOutcome {
  Inserted,
  /// A game with the same content hash was already stored.
  Skipped,
}

/// Counts for one ingest batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
  pub inserted: usize,
  pub skipped:  usize,
}

impl IngestReport {
  /// Fold another batch's counts into this one.
  pub fn absorb(&mut self, other: IngestReport) {
    self.inserted += other.inserted;
    self.skipped += other.skipped;
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Tabiya game store backend.
///
/// Writes are insert-only: a game whose content hash is already present is
/// skipped, never overwritten, and nothing is ever updated or deleted.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GameStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert one game unless its content hash is already present.
  ///
  /// Duplicate detection is the backend's responsibility and must hold under
  /// concurrent ingestion (a uniqueness violation counts as
  /// [`InsertOutcome::Skipped`], not as an error).
  fn insert_if_absent(
    &self,
    game: NewGame,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// Insert a batch, processed within a single storage call.
  fn ingest_games(
    &self,
    games: Vec<NewGame>,
  ) -> impl Future<Output = Result<IngestReport, Self::Error>> + Send + '_;

  /// All stored games matching the candidate query, ordered. No pagination
  /// here: the query engine paginates after derived filtering.
  fn candidate_games<'a>(
    &'a self,
    query: &'a CandidateQuery,
  ) -> impl Future<Output = Result<Vec<StoredGame>, Self::Error>> + Send + 'a;

  /// Retrieve a game by its identifier. `None` if not stored.
  fn get_game(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<StoredGame>, Self::Error>> + Send + '_;

  /// A plain window over all stored games, ordered by identifier.
  fn list_games(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<StoredGame>, Self::Error>> + Send + '_;
}
