//! Opening classification: ECO code and/or opening name → one family label.
//!
//! Classification is a pure lookup against two fixed tables. The ECO-range
//! table is coarse but practical; ranges are inclusive and non-overlapping,
//! checked in table order. Name rules are the fallback for games with no
//! usable ECO code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ─── OpeningFamily ───────────────────────────────────────────────────────────

/// A coarse grouping of related openings. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningFamily {
  #[serde(rename = "Sicilian Defense")]
  SicilianDefense,
  #[serde(rename = "French Defense")]
  FrenchDefense,
  #[serde(rename = "Caro-Kann Defense")]
  CaroKannDefense,
  #[serde(rename = "Scandinavian Defense")]
  ScandinavianDefense,
  #[serde(rename = "Alekhine Defense")]
  AlekhineDefense,
  #[serde(rename = "Pirc/Modern")]
  PircModern,
  #[serde(rename = "Ruy Lopez")]
  RuyLopez,
  #[serde(rename = "Italian Game")]
  ItalianGame,
  #[serde(rename = "Scotch Game")]
  ScotchGame,
  #[serde(rename = "Philidor Defense")]
  PhilidorDefense,
  #[serde(rename = "Petrov Defense")]
  PetrovDefense,
  #[serde(rename = "Queen's Gambit")]
  QueensGambit,
  #[serde(rename = "Slav/Semi-Slav")]
  SlavSemiSlav,
  #[serde(rename = "Catalan")]
  Catalan,
  #[serde(rename = "Nimzo-Indian")]
  NimzoIndian,
  #[serde(rename = "Queen's Indian")]
  QueensIndian,
  #[serde(rename = "King's Indian")]
  KingsIndian,
  #[serde(rename = "Grünfeld")]
  Grunfeld,
  #[serde(rename = "Benoni/Benko")]
  BenoniBenko,
  #[serde(rename = "Dutch Defense")]
  DutchDefense,
  #[serde(rename = "English Opening")]
  EnglishOpening,
  #[serde(rename = "London/Trompowsky/Jobava")]
  LondonTrompowskyJobava,
  #[serde(rename = "Vienna Game")]
  ViennaGame,
  #[serde(rename = "King's Gambit")]
  KingsGambit,
  #[serde(rename = "Other/Irregular")]
  OtherIrregular,
}

impl OpeningFamily {
  /// Every family, catch-all last.
  pub const ALL: [OpeningFamily; 25] = [
    Self::SicilianDefense,
    Self::FrenchDefense,
    Self::CaroKannDefense,
    Self::ScandinavianDefense,
    Self::AlekhineDefense,
    Self::PircModern,
    Self::RuyLopez,
    Self::ItalianGame,
    Self::ScotchGame,
    Self::PhilidorDefense,
    Self::PetrovDefense,
    Self::QueensGambit,
    Self::SlavSemiSlav,
    Self::Catalan,
    Self::NimzoIndian,
    Self::QueensIndian,
    Self::KingsIndian,
    Self::Grunfeld,
    Self::BenoniBenko,
    Self::DutchDefense,
    Self::EnglishOpening,
    Self::LondonTrompowskyJobava,
    Self::ViennaGame,
    Self::KingsGambit,
    Self::OtherIrregular,
  ];

  /// The human-readable label; also the serialized form.
  pub fn name(&self) -> &'static str {
    match self {
      Self::SicilianDefense => "Sicilian Defense",
      Self::FrenchDefense => "French Defense",
      Self::CaroKannDefense => "Caro-Kann Defense",
      Self::ScandinavianDefense => "Scandinavian Defense",
      Self::AlekhineDefense => "Alekhine Defense",
      Self::PircModern => "Pirc/Modern",
      Self::RuyLopez => "Ruy Lopez",
      Self::ItalianGame => "Italian Game",
      Self::ScotchGame => "Scotch Game",
      Self::PhilidorDefense => "Philidor Defense",
      Self::PetrovDefense => "Petrov Defense",
      Self::QueensGambit => "Queen's Gambit",
      Self::SlavSemiSlav => "Slav/Semi-Slav",
      Self::Catalan => "Catalan",
      Self::NimzoIndian => "Nimzo-Indian",
      Self::QueensIndian => "Queen's Indian",
      Self::KingsIndian => "King's Indian",
      Self::Grunfeld => "Grünfeld",
      Self::BenoniBenko => "Benoni/Benko",
      Self::DutchDefense => "Dutch Defense",
      Self::EnglishOpening => "English Opening",
      Self::LondonTrompowskyJobava => "London/Trompowsky/Jobava",
      Self::ViennaGame => "Vienna Game",
      Self::KingsGambit => "King's Gambit",
      Self::OtherIrregular => "Other/Irregular",
    }
  }

  /// Look a family up by its label, case-insensitively. Unknown labels are
  /// `None`, not an error.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|family| family.name().eq_ignore_ascii_case(name))
  }
}

impl std::fmt::Display for OpeningFamily {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

// ─── ECO ranges ──────────────────────────────────────────────────────────────

/// Inclusive ECO family ranges, checked in order. First match wins.
const ECO_RANGES: &[(&str, &str, OpeningFamily)] = &[
  ("B20", "B99", OpeningFamily::SicilianDefense),
  ("C00", "C19", OpeningFamily::FrenchDefense),
  ("B10", "B19", OpeningFamily::CaroKannDefense),
  ("B01", "B01", OpeningFamily::ScandinavianDefense),
  ("B02", "B05", OpeningFamily::AlekhineDefense),
  ("B06", "B09", OpeningFamily::PircModern),
  ("C60", "C99", OpeningFamily::RuyLopez),
  ("C50", "C59", OpeningFamily::ItalianGame),
  ("C44", "C45", OpeningFamily::ScotchGame),
  ("C41", "C41", OpeningFamily::PhilidorDefense),
  ("C40", "C42", OpeningFamily::PetrovDefense),
  ("D06", "D69", OpeningFamily::QueensGambit),
  ("D10", "D19", OpeningFamily::SlavSemiSlav),
  ("E01", "E09", OpeningFamily::Catalan),
  ("E20", "E59", OpeningFamily::NimzoIndian),
  ("E12", "E19", OpeningFamily::QueensIndian),
  ("E60", "E99", OpeningFamily::KingsIndian),
  ("D70", "D99", OpeningFamily::Grunfeld),
  ("A56", "A79", OpeningFamily::BenoniBenko),
  ("A80", "A99", OpeningFamily::DutchDefense),
  ("A10", "A39", OpeningFamily::EnglishOpening),
  // coarse bucket
  ("A45", "A46", OpeningFamily::LondonTrompowskyJobava),
  ("C25", "C29", OpeningFamily::ViennaGame),
  ("C30", "C39", OpeningFamily::KingsGambit),
  // also the catch-all when the name rules miss too
  ("A00", "A09", OpeningFamily::OtherIrregular),
];

// ─── Name rules ──────────────────────────────────────────────────────────────

/// Case-insensitive fallback rules over the free-text opening name, checked
/// in order. First match wins.
static NAME_RULES: Lazy<Vec<(Regex, OpeningFamily)>> = Lazy::new(|| {
  [
    (r"sicilian", OpeningFamily::SicilianDefense),
    (r"french", OpeningFamily::FrenchDefense),
    (r"caro[- ]?kann", OpeningFamily::CaroKannDefense),
    (r"italian", OpeningFamily::ItalianGame),
    (r"ruy", OpeningFamily::RuyLopez),
    (r"scotch", OpeningFamily::ScotchGame),
    (r"petrov|russian", OpeningFamily::PetrovDefense),
    (r"philidor", OpeningFamily::PhilidorDefense),
    (r"queen'?s gambit", OpeningFamily::QueensGambit),
    (r"slav", OpeningFamily::SlavSemiSlav),
    (r"catalan", OpeningFamily::Catalan),
    (r"nimzo", OpeningFamily::NimzoIndian),
    (r"queen'?s indian", OpeningFamily::QueensIndian),
    (r"king'?s indian", OpeningFamily::KingsIndian),
    (r"gr[uü]nfeld", OpeningFamily::Grunfeld),
    (r"benoni|benko", OpeningFamily::BenoniBenko),
    (r"dutch", OpeningFamily::DutchDefense),
    (r"english", OpeningFamily::EnglishOpening),
    (r"vienna", OpeningFamily::ViennaGame),
    (r"king'?s gambit", OpeningFamily::KingsGambit),
    (r"pirc|modern", OpeningFamily::PircModern),
    (r"london|tromp|jobava", OpeningFamily::LondonTrompowskyJobava),
  ]
  .into_iter()
  .map(|(pattern, family)| {
    let rx = Regex::new(&format!("(?i){pattern}")).expect("static pattern");
    (rx, family)
  })
  .collect()
});

// ─── Classification ──────────────────────────────────────────────────────────

/// Ordered numeric key for a well-formed ECO code: letter weight A..E times
/// 1000 plus the two-digit value (`"B90"` → 2090). Malformed codes (wrong
/// length, letter outside A–E, non-digits) are `None`.
fn eco_key(eco: &str) -> Option<u16> {
  let bytes = eco.as_bytes();
  if bytes.len() != 3 {
    return None;
  }
  let letter = bytes[0].to_ascii_uppercase();
  if !(b'A'..=b'E').contains(&letter) {
    return None;
  }
  let (d1, d2) = (bytes[1], bytes[2]);
  if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
    return None;
  }
  let weight = (letter - b'A' + 1) as u16;
  Some(weight * 1000 + (d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
}

/// Map an optional ECO code and/or opening name to exactly one family.
///
/// The ECO range table is consulted first; the name rules only when the code
/// is absent, malformed, or outside every range. Total and deterministic:
/// every input, including both absent, yields a family.
pub fn classify(eco: Option<&str>, opening: Option<&str>) -> OpeningFamily {
  if let Some(eco) = eco
    && let Some(key) = eco_key(eco)
  {
    for (start, end, family) in ECO_RANGES {
      let (Some(lo), Some(hi)) = (eco_key(start), eco_key(end)) else {
        continue;
      };
      if (lo..=hi).contains(&key) {
        return *family;
      }
    }
  }
  if let Some(name) = opening {
    for (rx, family) in NAME_RULES.iter() {
      if rx.is_match(name) {
        return *family;
      }
    }
  }
  OpeningFamily::OtherIrregular
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn eco_key_orders_letters_before_digits() {
    assert_eq!(eco_key("A00"), Some(1000));
    assert_eq!(eco_key("B90"), Some(2090));
    assert_eq!(eco_key("E99"), Some(5099));
    assert!(eco_key("A99") < eco_key("B00"));
  }

  #[test]
  fn eco_key_rejects_malformed_codes() {
    assert_eq!(eco_key(""), None);
    assert_eq!(eco_key("B9"), None);
    assert_eq!(eco_key("B900"), None);
    assert_eq!(eco_key("Z99"), None);
    assert_eq!(eco_key("B9x"), None);
    assert_eq!(eco_key("9B0"), None);
  }

  #[test]
  fn eco_key_is_case_insensitive() {
    assert_eq!(eco_key("b32"), eco_key("B32"));
  }

  #[test]
  fn classify_by_eco_range() {
    assert_eq!(classify(Some("B32"), None), OpeningFamily::SicilianDefense);
    assert_eq!(classify(Some("C02"), None), OpeningFamily::FrenchDefense);
    assert_eq!(classify(Some("B12"), None), OpeningFamily::CaroKannDefense);
    assert_eq!(classify(Some("C65"), None), OpeningFamily::RuyLopez);
    assert_eq!(classify(Some("D37"), None), OpeningFamily::QueensGambit);
    assert_eq!(classify(Some("E04"), None), OpeningFamily::Catalan);
    assert_eq!(classify(Some("E92"), None), OpeningFamily::KingsIndian);
    assert_eq!(classify(Some("A04"), None), OpeningFamily::OtherIrregular);
  }

  #[test]
  fn classify_eco_range_bounds_are_inclusive() {
    assert_eq!(classify(Some("B20"), None), OpeningFamily::SicilianDefense);
    assert_eq!(classify(Some("B99"), None), OpeningFamily::SicilianDefense);
    assert_eq!(classify(Some("B19"), None), OpeningFamily::CaroKannDefense);
    assert_eq!(classify(Some("B01"), None), OpeningFamily::ScandinavianDefense);
  }

  #[test]
  fn classify_eco_wins_over_name() {
    // A matching range decides the family regardless of the name.
    assert_eq!(
      classify(Some("B90"), Some("French Defense")),
      OpeningFamily::SicilianDefense,
    );
  }

  #[test]
  fn classify_eco_is_case_insensitive() {
    assert_eq!(classify(Some("b90"), None), OpeningFamily::SicilianDefense);
  }

  #[test]
  fn classify_falls_back_to_name_rules() {
    assert_eq!(
      classify(None, Some("Queen's Gambit Declined")),
      OpeningFamily::QueensGambit,
    );
    assert_eq!(
      classify(None, Some("Queens Gambit Accepted")),
      OpeningFamily::QueensGambit,
    );
    assert_eq!(classify(None, Some("SICILIAN NAJDORF")), OpeningFamily::SicilianDefense);
    assert_eq!(classify(None, Some("Russian Game")), OpeningFamily::PetrovDefense);
    assert_eq!(classify(None, Some("Gruenfeld... Grünfeld")), OpeningFamily::Grunfeld);
    assert_eq!(classify(None, Some("Caro Kann Advance")), OpeningFamily::CaroKannDefense);
  }

  #[test]
  fn classify_malformed_eco_falls_back_to_name() {
    assert_eq!(
      classify(Some("Z99"), Some("Dutch Defense")),
      OpeningFamily::DutchDefense,
    );
  }

  #[test]
  fn classify_unmatched_inputs_are_other() {
    assert_eq!(classify(None, None), OpeningFamily::OtherIrregular);
    assert_eq!(classify(Some("Z99"), Some("nonsense")), OpeningFamily::OtherIrregular);
    // A40 sits in a gap between ranges and the name matches no rule.
    assert_eq!(classify(Some("A40"), Some("Englund Gambit")), OpeningFamily::OtherIrregular);
  }

  #[test]
  fn name_rule_order_decides_ties() {
    // "King's Indian Defense" matches the King's Indian rule before the
    // King's Gambit rule could ever see it.
    assert_eq!(classify(None, Some("King's Indian Defense")), OpeningFamily::KingsIndian);
    // "Modern Defense" resolves through the pirc|modern rule.
    assert_eq!(classify(None, Some("Modern Defense")), OpeningFamily::PircModern);
  }

  #[test]
  fn from_name_is_case_insensitive_and_total() {
    assert_eq!(
      OpeningFamily::from_name("sicilian defense"),
      Some(OpeningFamily::SicilianDefense),
    );
    assert_eq!(OpeningFamily::from_name("no such family"), None);
  }

  #[test]
  fn every_range_endpoint_classifies_to_its_family() {
    for (start, end, family) in ECO_RANGES {
      assert_eq!(classify(Some(start), None), *family, "start of {start}-{end}");
      assert_eq!(classify(Some(end), None), *family, "end of {start}-{end}");
    }
  }
}
