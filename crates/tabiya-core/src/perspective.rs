//! Player-perspective derivation: which side a user played and how the game
//! ended from their point of view.
//!
//! Both resolvers are pure and total. Missing data (no outcome, a user who
//! played neither side) resolves to `None`, never to an error.

use serde::{Deserialize, Serialize};

use crate::game::{Outcome, StoredGame};

/// The side a player held in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
  White,
  Black,
}

/// A game's outcome relative to one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PovResult {
  Win,
  Loss,
  Draw,
}

fn is_player(field: Option<&str>, username: &str) -> bool {
  field.is_some_and(|name| name.eq_ignore_ascii_case(username))
}

/// The color `username` held in `game`, or `None` if the name matches
/// neither player field (case-insensitive exact comparison).
pub fn resolve_color(username: &str, game: &StoredGame) -> Option<Color> {
  if is_player(game.white.as_deref(), username) {
    Some(Color::White)
  } else if is_player(game.black.as_deref(), username) {
    Some(Color::Black)
  } else {
    None
  }
}

/// The outcome of `game` from `username`'s point of view.
///
/// `None` when the outcome is absent or unrecognized, or when the user
/// played neither side.
pub fn resolve_pov(username: &str, game: &StoredGame) -> Option<PovResult> {
  let outcome = game.decoded_outcome()?;
  let color = resolve_color(username, game)?;
  Some(match (outcome, color) {
    (Outcome::Draw, _) => PovResult::Draw,
    (Outcome::WhiteWins, Color::White) => PovResult::Win,
    (Outcome::BlackWins, Color::Black) => PovResult::Win,
    _ => PovResult::Loss,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn game(white: Option<&str>, black: Option<&str>, outcome: Option<&str>) -> StoredGame {
    StoredGame {
      id:           1,
      content_hash: "deadbeef".into(),
      pgn:          String::new(),
      year:         2024,
      month:        1,
      white:        white.map(str::to_owned),
      black:        black.map(str::to_owned),
      outcome:      outcome.map(str::to_owned),
      time_control: None,
      eco_url:      None,
      eco:          None,
      opening:      None,
      end_time_utc: None,
    }
  }

  #[test]
  fn color_matches_case_insensitively() {
    let g = game(Some("Alice"), Some("Bob"), Some("1-0"));
    assert_eq!(resolve_color("alice", &g), Some(Color::White));
    assert_eq!(resolve_color("BOB", &g), Some(Color::Black));
    assert_eq!(resolve_color("carol", &g), None);
  }

  #[test]
  fn color_is_none_when_names_are_missing() {
    let g = game(None, None, Some("1-0"));
    assert_eq!(resolve_color("alice", &g), None);
  }

  #[test]
  fn pov_is_symmetric_under_player_swap() {
    let g = game(Some("alice"), Some("bob"), Some("1-0"));
    assert_eq!(resolve_pov("alice", &g), Some(PovResult::Win));
    assert_eq!(resolve_pov("bob", &g), Some(PovResult::Loss));

    let g = game(Some("alice"), Some("bob"), Some("0-1"));
    assert_eq!(resolve_pov("alice", &g), Some(PovResult::Loss));
    assert_eq!(resolve_pov("bob", &g), Some(PovResult::Win));
  }

  #[test]
  fn pov_draw_applies_to_both_players() {
    let g = game(Some("alice"), Some("bob"), Some("1/2-1/2"));
    assert_eq!(resolve_pov("alice", &g), Some(PovResult::Draw));
    assert_eq!(resolve_pov("bob", &g), Some(PovResult::Draw));
  }

  #[test]
  fn pov_is_none_for_a_bystander() {
    for outcome in ["1-0", "0-1", "1/2-1/2"] {
      let g = game(Some("alice"), Some("bob"), Some(outcome));
      assert_eq!(resolve_pov("carol", &g), None);
    }
  }

  #[test]
  fn pov_is_none_without_an_outcome() {
    let g = game(Some("alice"), Some("bob"), None);
    assert_eq!(resolve_pov("alice", &g), None);
  }

  #[test]
  fn pov_is_none_for_unrecognized_outcome_codes() {
    let g = game(Some("alice"), Some("bob"), Some("abandoned"));
    assert_eq!(resolve_pov("alice", &g), None);
  }
}
