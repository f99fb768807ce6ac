//! Tag-pair scanning and bulk-PGN splitting.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_games()  → one String per game
//!          └─ headers() → (tag, value) pairs
//!               └─ tag() → single value lookup

use once_cell::sync::Lazy;
use regex::Regex;

/// One `[Tag "Value"]` pair per line in the header section.
static TAG_PAIR: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"(?m)^\[(\S+)\s+"(.*?)"\]$"#).expect("static pattern"));

/// The start of a new game inside a bulk blob: a blank-line run followed by
/// an `[Event "` tag.
static GAME_BOUNDARY: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"\n{2,}\[Event ""#).expect("static pattern"));

/// Extract all tag pairs from a game's header section, in order.
///
/// Lines that do not form a well-formed tag pair are skipped.
pub fn headers(pgn: &str) -> Vec<(String, String)> {
  TAG_PAIR
    .captures_iter(pgn)
    .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
    .collect()
}

/// The first value recorded for `name`, if any. Tag names are matched
/// exactly — PGN tag names are case-sensitive by convention.
pub fn tag(pgn: &str, name: &str) -> Option<String> {
  TAG_PAIR
    .captures_iter(pgn)
    .find(|caps| &caps[1] == name)
    .map(|caps| caps[2].to_owned())
}

/// Split a bulk PGN blob into individual game texts.
///
/// Splits on two-or-more newlines that precede a new `[Event "` tag, which
/// is more robust than a raw blank-line split and avoids breaking inside
/// comments. CRLF and lone CR line endings are normalized first.
pub fn split_games(blob: &str) -> Vec<String> {
  let text = blob.replace("\r\n", "\n").replace('\r', "\n");
  let text = text.trim();
  if text.is_empty() {
    return Vec::new();
  }

  // The regex crate has no lookahead; cut just before each matched
  // `[Event "` instead.
  let mut cuts = vec![0usize];
  for m in GAME_BOUNDARY.find_iter(text) {
    // `[Event "` is 8 bytes from the end of the match.
    cuts.push(m.end() - 8);
  }
  cuts.push(text.len());

  cuts
    .windows(2)
    .map(|w| text[w[0]..w[1]].trim())
    .filter(|part| !part.is_empty())
    .map(str::to_owned)
    .collect()
}
