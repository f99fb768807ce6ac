//! SQL schema for the Tabiya SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Games are insert-only.
-- No UPDATE or DELETE is ever issued against this table.
-- The UNIQUE content hash is the source of truth for ingest dedup, so a
-- conflicting insert (including one racing a concurrent ingest) is a skip,
-- never a corruption.
CREATE TABLE IF NOT EXISTS games (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    content_hash  TEXT NOT NULL UNIQUE,  -- SHA-256 hex of the raw PGN
    pgn           TEXT NOT NULL,
    year          INTEGER NOT NULL,
    month         INTEGER NOT NULL,
    white         TEXT,
    black         TEXT,
    outcome       TEXT,                  -- raw result code: '1-0' | '0-1' | '1/2-1/2'
    time_control  TEXT,
    eco_url       TEXT,
    eco           TEXT,
    opening       TEXT,
    end_time_utc  INTEGER
);

CREATE INDEX IF NOT EXISTS games_white_idx ON games(white);
CREATE INDEX IF NOT EXISTS games_black_idx ON games(black);
CREATE INDEX IF NOT EXISTS games_eco_idx   ON games(eco);

PRAGMA user_version = 1;
";
