//! Core types and trait definitions for the Tabiya game store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// Backends implement the store trait with native `async fn`; silence the
// advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod game;
pub mod openings;
pub mod perspective;
pub mod query;
pub mod store;

pub use game::{NewGame, Outcome, StoredGame};
pub use openings::{OpeningFamily, classify};
pub use perspective::{Color, PovResult, resolve_color, resolve_pov};
pub use query::{GameFilter, GameView, Page, QueryService};
pub use store::{
  CandidateQuery, GameOrder, GameStore, IngestReport, InsertOutcome, OrderDir,
  OrderField,
};
