//! Game records — the unit of storage for Tabiya.
//!
//! A stored game is immutable: rows are created by the ingest path and never
//! updated or deleted. Everything derived from a game (opening family, the
//! requesting player's color and result) is recomputed on read.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Absolute game outcome, decoded from the stored result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  WhiteWins,
  BlackWins,
  Draw,
}

impl Outcome {
  /// Decode a result code. Anything but the three PGN result strings is
  /// unknown — `None`, never an error.
  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "1-0" => Some(Self::WhiteWins),
      "0-1" => Some(Self::BlackWins),
      "1/2-1/2" => Some(Self::Draw),
      _ => None,
    }
  }

  /// The PGN result code for this outcome.
  pub fn code(&self) -> &'static str {
    match self {
      Self::WhiteWins => "1-0",
      Self::BlackWins => "0-1",
      Self::Draw => "1/2-1/2",
    }
  }
}

// ─── NewGame ─────────────────────────────────────────────────────────────────

/// Input to [`GameStore::insert_if_absent`](crate::store::GameStore).
///
/// The narrow ingestion contract: any producer of game data (the Chess.com
/// fetcher, a PGN import, a test) builds one of these explicitly. `id` and
/// `content_hash` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
  /// Raw PGN text; the dedup key is a hash of exactly these bytes.
  pub pgn:          String,
  pub year:         u16,
  pub month:        u8,
  pub white:        Option<String>,
  pub black:        Option<String>,
  /// Raw result code as reported by the source (`1-0`, `0-1`, `1/2-1/2`).
  pub outcome:      Option<String>,
  pub time_control: Option<String>,
  /// Chess.com opening URL carried in the archive payload's `eco` field.
  pub eco_url:      Option<String>,
  pub eco:          Option<String>,
  pub opening:      Option<String>,
  pub end_time_utc: Option<i64>,
}

impl NewGame {
  /// SHA-256 hex digest of the raw PGN text. Two games with identical raw
  /// text hash identically regardless of how they were fetched.
  pub fn content_hash(&self) -> String {
    let mut hasher = Sha256::new();
    hasher.update(self.pgn.as_bytes());
    hex::encode(hasher.finalize())
  }
}

// ─── StoredGame ──────────────────────────────────────────────────────────────

/// A persisted game row. Once written, no field is ever updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGame {
  /// Storage-assigned identifier; the default ordering key.
  pub id:           i64,
  /// SHA-256 hex digest of `pgn`; unique across the store.
  pub content_hash: String,
  pub pgn:          String,
  pub year:         u16,
  pub month:        u8,
  pub white:        Option<String>,
  pub black:        Option<String>,
  pub outcome:      Option<String>,
  pub time_control: Option<String>,
  pub eco_url:      Option<String>,
  pub eco:          Option<String>,
  pub opening:      Option<String>,
  pub end_time_utc: Option<i64>,
}

impl StoredGame {
  /// The decoded outcome, if the stored code is one of the recognized PGN
  /// result strings.
  pub fn decoded_outcome(&self) -> Option<Outcome> {
    self.outcome.as_deref().and_then(Outcome::from_code)
  }
}
