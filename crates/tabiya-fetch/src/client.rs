//! Async HTTP client for the Chess.com public archive API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tabiya_core::NewGame;

use crate::{ArchiveMonth, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";

const USER_AGENT: &str = "tabiya/0.1 (+https://example.local)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for the Chess.com player-archive endpoints.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. The base
/// URL is configurable so tests can point at a local fixture server.
#[derive(Clone)]
pub struct ChessComClient {
  client:   reqwest::Client,
  base_url: String,
}

impl ChessComClient {
  pub fn new() -> Result<Self> {
    Self::with_base_url(DEFAULT_BASE_URL)
  }

  pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(REQUEST_TIMEOUT)
      .build()?;
    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_owned(),
    })
  }

  fn month_url(&self, username: &str, month: ArchiveMonth) -> String {
    format!(
      "{}/player/{}/games/{:04}/{:02}",
      self.base_url,
      username,
      month.year(),
      month.month(),
    )
  }

  fn archives_url(&self, username: &str) -> String {
    format!("{}/player/{}/games/archives", self.base_url, username)
  }

  /// Fetch one player-month of finished games.
  ///
  /// A 404 means no games for that month and yields an empty Vec, matching
  /// how the upstream API reports empty months.
  pub async fn fetch_month(
    &self,
    username: &str,
    month: ArchiveMonth,
  ) -> Result<Vec<NewGame>> {
    let url = self.month_url(username, month);
    tracing::debug!(%url, "fetching monthly archive");

    let resp = self.client.get(&url).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(Vec::new());
    }
    if !resp.status().is_success() {
      return Err(Error::Status { url, status: resp.status() });
    }

    let payload: MonthPayload = resp.json().await?;
    Ok(
      payload
        .games
        .into_iter()
        .map(|g| g.into_new_game(month))
        .collect(),
    )
  }

  /// List every monthly archive the player has, oldest first.
  pub async fn list_archives(&self, username: &str) -> Result<Vec<ArchiveMonth>> {
    let url = self.archives_url(username);
    tracing::debug!(%url, "listing archives");

    let resp = self.client.get(&url).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(Vec::new());
    }
    if !resp.status().is_success() {
      return Err(Error::Status { url, status: resp.status() });
    }

    let payload: ArchivesPayload = resp.json().await?;
    payload
      .archives
      .iter()
      .map(|url| parse_archive_url(url))
      .collect()
  }
}

/// Pull the trailing `{year}/{month}` out of an archive URL like
/// `https://api.chess.com/pub/player/ann/games/2024/05`.
fn parse_archive_url(url: &str) -> Result<ArchiveMonth> {
  let mut parts = url.trim_end_matches('/').rsplit('/');
  let month = parts.next().and_then(|s| s.parse::<u8>().ok());
  let year = parts.next().and_then(|s| s.parse::<u16>().ok());
  match (year, month) {
    (Some(year), Some(month)) => ArchiveMonth::new(year, month),
    _ => Err(Error::MalformedArchiveUrl(url.to_owned())),
  }
}

// ─── Payload shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MonthPayload {
  #[serde(default)]
  games: Vec<PayloadGame>,
}

#[derive(Debug, Deserialize)]
struct ArchivesPayload {
  #[serde(default)]
  archives: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerRef {
  #[serde(default)]
  username: Option<String>,
}

/// One game as the archive endpoint reports it. The JSON's `eco` field is an
/// opening *URL*; the actual ECO code, opening name, and result live in the
/// PGN tags.
#[derive(Debug, Deserialize)]
struct PayloadGame {
  #[serde(default)]
  pgn:          Option<String>,
  #[serde(default)]
  time_control: Option<String>,
  #[serde(default)]
  end_time:     Option<i64>,
  #[serde(default)]
  eco:          Option<String>,
  #[serde(default)]
  white:        Option<PlayerRef>,
  #[serde(default)]
  black:        Option<PlayerRef>,
}

impl PayloadGame {
  fn into_new_game(self, month: ArchiveMonth) -> NewGame {
    let pgn = self.pgn.unwrap_or_default();
    let eco = tabiya_pgn::tag(&pgn, tabiya_pgn::TAG_ECO);
    let opening = tabiya_pgn::tag(&pgn, tabiya_pgn::TAG_OPENING);
    let outcome = tabiya_pgn::tag(&pgn, tabiya_pgn::TAG_RESULT);
    NewGame {
      pgn,
      year: month.year(),
      month: month.month(),
      white: self.white.and_then(|p| p.username),
      black: self.black.and_then(|p| p.username),
      outcome,
      time_control: self.time_control,
      eco_url: self.eco,
      eco,
      opening,
      end_time_utc: self.end_time,
    }
  }
}
