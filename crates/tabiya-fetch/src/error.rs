//! Error type for `tabiya-fetch`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Month outside 1–12, or a year before Chess.com's 2007 archive epoch.
  #[error("no such archive month: {year:04}-{month:02}")]
  InvalidArchiveMonth { year: u16, month: u8 },

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected status {status} from {url}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },

  #[error("cannot parse archive url: {0}")]
  MalformedArchiveUrl(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
