//! Row mapping between `games` columns and the core [`StoredGame`] type.
//!
//! Columns map to Rust types directly: integers stay integers, optional text
//! stays `Option<String>`. The raw outcome code is stored as-is; decoding it
//! is a read-time concern of `tabiya-core`.

use tabiya_core::StoredGame;

/// Column list shared by every `games` SELECT, in [`game_from_row`] order.
pub const GAME_COLUMNS: &str = "id, content_hash, pgn, year, month, white, \
                                black, outcome, time_control, eco_url, eco, \
                                opening, end_time_utc";

/// Map one `games` row (selected with [`GAME_COLUMNS`]) to a [`StoredGame`].
pub fn game_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredGame> {
  Ok(StoredGame {
    id:           row.get(0)?,
    content_hash: row.get(1)?,
    pgn:          row.get(2)?,
    year:         row.get(3)?,
    month:        row.get(4)?,
    white:        row.get(5)?,
    black:        row.get(6)?,
    outcome:      row.get(7)?,
    time_control: row.get(8)?,
    eco_url:      row.get(9)?,
    eco:          row.get(10)?,
    opening:      row.get(11)?,
    end_time_utc: row.get(12)?,
  })
}
