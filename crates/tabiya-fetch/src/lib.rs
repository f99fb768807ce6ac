//! Chess.com public-archive client for Tabiya.
//!
//! Fetches one player-month of finished games at a time and converts each
//! payload entry into the narrow [`tabiya_core::NewGame`] ingestion input,
//! enriched with the PGN tags the JSON payload does not carry. No retry or
//! backoff lives here; callers decide how to handle transport failures.

mod client;
mod month;

pub mod error;

pub use client::{ChessComClient, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use month::ArchiveMonth;
