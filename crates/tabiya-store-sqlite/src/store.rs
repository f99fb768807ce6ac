//! [`SqliteStore`] — the SQLite implementation of [`GameStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tabiya_core::{
  game::{NewGame, StoredGame},
  store::{
    CandidateQuery, GameOrder, GameStore, IngestReport, InsertOutcome,
    OrderDir, OrderField,
  },
};

use crate::{
  Error, Result,
  encode::{GAME_COLUMNS, game_from_row},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tabiya game store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `ORDER BY` clause for a candidate query; `id` breaks end-time ties so the
/// order is total.
fn order_clause(order: GameOrder) -> &'static str {
  match (order.field, order.dir) {
    (OrderField::Id, OrderDir::Asc) => "ORDER BY id ASC",
    (OrderField::Id, OrderDir::Desc) => "ORDER BY id DESC",
    (OrderField::EndTime, OrderDir::Asc) => "ORDER BY end_time_utc ASC, id ASC",
    (OrderField::EndTime, OrderDir::Desc) => "ORDER BY end_time_utc DESC, id DESC",
  }
}

// ─── GameStore impl ──────────────────────────────────────────────────────────

impl GameStore for SqliteStore {
  type Error = Error;

  async fn insert_if_absent(&self, game: NewGame) -> Result<InsertOutcome> {
    let report = self.ingest_games(vec![game]).await?;
    Ok(if report.inserted == 1 {
      InsertOutcome::Inserted
    } else {
      InsertOutcome::Skipped
    })
  }

  async fn ingest_games(&self, games: Vec<NewGame>) -> Result<IngestReport> {
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = IngestReport::default();
        {
          // The UNIQUE constraint on content_hash is the dedup authority:
          // a conflicting insert changes no rows and counts as skipped.
          let mut stmt = tx.prepare(
            "INSERT INTO games (
               content_hash, pgn, year, month, white, black, outcome,
               time_control, eco_url, eco, opening, end_time_utc
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(content_hash) DO NOTHING",
          )?;
          for game in &games {
            let changed = stmt.execute(rusqlite::params![
              game.content_hash(),
              game.pgn,
              game.year,
              game.month,
              game.white,
              game.black,
              game.outcome,
              game.time_control,
              game.eco_url,
              game.eco,
              game.opening,
              game.end_time_utc,
            ])?;
            if changed == 1 {
              report.inserted += 1;
            } else {
              report.skipped += 1;
            }
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;
    Ok(report)
  }

  async fn candidate_games(&self, query: &CandidateQuery) -> Result<Vec<StoredGame>> {
    let username_pattern = format!("%{}%", query.username);
    let opening_pattern  = query.opening_like.as_deref().map(|s| format!("%{s}%"));
    let eco_pattern      = query.eco_prefix.as_deref().map(|s| format!("{s}%"));
    let order            = order_clause(query.order);

    let games = self
      .conn
      .call(move |conn| {
        // LIKE is case-insensitive over ASCII, which covers usernames,
        // opening names, and ECO codes as stored.
        let sql = format!(
          "SELECT {GAME_COLUMNS}
           FROM games
           WHERE (white LIKE ?1 OR black LIKE ?1)
             AND (?2 IS NULL OR opening LIKE ?2)
             AND (?3 IS NULL OR eco LIKE ?3)
           {order}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![username_pattern, opening_pattern, eco_pattern],
            game_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(games)
  }

  async fn get_game(&self, id: i64) -> Result<Option<StoredGame>> {
    let game = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], game_from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(game)
  }

  async fn list_games(&self, limit: usize, offset: usize) -> Result<Vec<StoredGame>> {
    let limit  = limit.min(i64::MAX as usize) as i64;
    let offset = offset.min(i64::MAX as usize) as i64;

    let games = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {GAME_COLUMNS} FROM games ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], game_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(games)
  }
}
