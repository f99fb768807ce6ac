//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use tabiya_core::{
  Color, GameFilter, GameOrder, NewGame, OpeningFamily, Page, PovResult,
  QueryService,
  store::{CandidateQuery, GameStore, InsertOutcome, OrderDir, OrderField},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn game(white: &str, black: &str, outcome: &str, eco: &str, opening: Option<&str>) -> NewGame {
  NewGame {
    // Distinct headers give every game a distinct content hash.
    pgn:          format!(
      "[Event \"Live Chess\"]\n[White \"{white}\"]\n[Black \"{black}\"]\n\
       [Result \"{outcome}\"]\n[ECO \"{eco}\"]\n\n1. e4 {outcome}\n"
    ),
    year:         2024,
    month:        5,
    white:        Some(white.to_owned()),
    black:        Some(black.to_owned()),
    outcome:      Some(outcome.to_owned()),
    time_control: Some("600".to_owned()),
    eco_url:      None,
    eco:          Some(eco.to_owned()),
    opening:      opening.map(str::to_owned),
    end_time_utc: None,
  }
}

fn candidates_for(username: &str) -> CandidateQuery {
  CandidateQuery { username: username.to_owned(), ..Default::default() }
}

// ─── Ingest ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ingest_reports_inserted_counts() {
  let s = store().await;
  let report = s
    .ingest_games(vec![
      game("ann", "bob", "1-0", "B90", None),
      game("bob", "ann", "0-1", "C60", None),
    ])
    .await
    .unwrap();
  assert_eq!(report.inserted, 2);
  assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn ingest_same_content_twice_skips_the_second_time() {
  let s = store().await;
  let g = game("ann", "bob", "1-0", "B90", None);

  let first = s.ingest_games(vec![g.clone()]).await.unwrap();
  assert_eq!((first.inserted, first.skipped), (1, 0));

  let second = s.ingest_games(vec![g]).await.unwrap();
  assert_eq!((second.inserted, second.skipped), (0, 1));

  let all = s.list_games(100, 0).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn ingest_dedups_within_a_single_batch() {
  let s = store().await;
  let g = game("ann", "bob", "1-0", "B90", None);
  let report = s.ingest_games(vec![g.clone(), g]).await.unwrap();
  assert_eq!((report.inserted, report.skipped), (1, 1));
}

#[tokio::test]
async fn insert_if_absent_reports_the_outcome() {
  let s = store().await;
  let g = game("ann", "bob", "1-0", "B90", None);

  let first = s.insert_if_absent(g.clone()).await.unwrap();
  assert_eq!(first, InsertOutcome::Inserted);

  let second = s.insert_if_absent(g).await.unwrap();
  assert_eq!(second, InsertOutcome::Skipped);
}

#[tokio::test]
async fn stored_row_round_trips_all_columns() {
  let s = store().await;
  let mut g = game("ann", "bob", "1/2-1/2", "D37", Some("Queen's Gambit Declined"));
  g.eco_url = Some("https://www.chess.com/openings/Queens-Gambit-Declined".to_owned());
  g.end_time_utc = Some(1_714_000_000);
  let hash = g.content_hash();

  s.insert_if_absent(g.clone()).await.unwrap();
  let rows = s.candidate_games(&candidates_for("ann")).await.unwrap();
  assert_eq!(rows.len(), 1);

  let row = &rows[0];
  assert_eq!(row.content_hash, hash);
  assert_eq!(row.pgn, g.pgn);
  assert_eq!(row.year, 2024);
  assert_eq!(row.month, 5);
  assert_eq!(row.white.as_deref(), Some("ann"));
  assert_eq!(row.black.as_deref(), Some("bob"));
  assert_eq!(row.outcome.as_deref(), Some("1/2-1/2"));
  assert_eq!(row.time_control.as_deref(), Some("600"));
  assert_eq!(row.eco_url, g.eco_url);
  assert_eq!(row.eco.as_deref(), Some("D37"));
  assert_eq!(row.opening.as_deref(), Some("Queen's Gambit Declined"));
  assert_eq!(row.end_time_utc, Some(1_714_000_000));

  let by_id = s.get_game(row.id).await.unwrap().unwrap();
  assert_eq!(by_id.content_hash, hash);
}

// ─── Candidate selection ─────────────────────────────────────────────────────

#[tokio::test]
async fn candidates_match_either_player_case_insensitively() {
  let s = store().await;
  s.ingest_games(vec![
    game("Ann", "bob", "1-0", "B90", None),
    game("bob", "ANN", "0-1", "C60", None),
    game("carol", "dave", "1-0", "A04", None),
  ])
  .await
  .unwrap();

  let rows = s.candidate_games(&candidates_for("ann")).await.unwrap();
  assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn candidates_use_substring_containment() {
  // Documented looser-than-equality behavior: "ann" also selects rows
  // played by "annabelle". Perspective resolution filters those out
  // whenever a color or result filter applies.
  let s = store().await;
  s.ingest_games(vec![
    game("annabelle", "bob", "1-0", "B90", None),
    game("carol", "dave", "1-0", "A04", None),
  ])
  .await
  .unwrap();

  let rows = s.candidate_games(&candidates_for("ann")).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].white.as_deref(), Some("annabelle"));
}

#[tokio::test]
async fn candidates_apply_opening_and_eco_filters() {
  let s = store().await;
  s.ingest_games(vec![
    game("ann", "bob", "1-0", "B90", Some("Sicilian Defense: Najdorf Variation")),
    game("ann", "bob", "0-1", "B22", Some("Sicilian Defense: Alapin Variation")),
    game("ann", "bob", "1-0", "C60", Some("Ruy Lopez: Morphy Defense")),
  ])
  .await
  .unwrap();

  let by_opening = s
    .candidate_games(&CandidateQuery {
      username:     "ann".to_owned(),
      opening_like: Some("sicilian".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_opening.len(), 2);

  let by_eco = s
    .candidate_games(&CandidateQuery {
      username:   "ann".to_owned(),
      eco_prefix: Some("b9".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_eco.len(), 1);
  assert_eq!(by_eco[0].eco.as_deref(), Some("B90"));

  let combined = s
    .candidate_games(&CandidateQuery {
      username:     "ann".to_owned(),
      opening_like: Some("najdorf".to_owned()),
      eco_prefix:   Some("B".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(combined.len(), 1);
}

#[tokio::test]
async fn candidates_with_null_opening_are_excluded_by_opening_filter() {
  let s = store().await;
  s.ingest_games(vec![game("ann", "bob", "1-0", "B90", None)])
    .await
    .unwrap();

  let rows = s
    .candidate_games(&CandidateQuery {
      username:     "ann".to_owned(),
      opening_like: Some("sicilian".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn candidates_honor_ordering() {
  let s = store().await;
  s.ingest_games(vec![
    game("ann", "bob", "1-0", "B90", None),
    game("ann", "bob", "0-1", "C60", None),
    game("ann", "bob", "1/2-1/2", "D37", None),
  ])
  .await
  .unwrap();

  let default_order = s.candidate_games(&candidates_for("ann")).await.unwrap();
  let ids: Vec<i64> = default_order.iter().map(|g| g.id).collect();
  let mut ascending = ids.clone();
  ascending.sort_unstable();
  let reversed: Vec<i64> = ascending.iter().rev().copied().collect();
  // Default is id descending.
  assert_eq!(ids, reversed);

  let asc = s
    .candidate_games(&CandidateQuery {
      username: "ann".to_owned(),
      order:    GameOrder { field: OrderField::Id, dir: OrderDir::Asc },
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(asc.iter().map(|g| g.id).collect::<Vec<_>>(), ascending);
}

#[tokio::test]
async fn no_candidates_is_an_empty_sequence() {
  let s = store().await;
  let rows = s.candidate_games(&candidates_for("nobody")).await.unwrap();
  assert!(rows.is_empty());
}

// ─── Point reads ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_game_missing_returns_none() {
  let s = store().await;
  assert!(s.get_game(424242).await.unwrap().is_none());
}

#[tokio::test]
async fn list_games_windows_by_id() {
  let s = store().await;
  s.ingest_games(vec![
    game("ann", "bob", "1-0", "B90", None),
    game("ann", "bob", "0-1", "C60", None),
    game("ann", "bob", "1/2-1/2", "D37", None),
  ])
  .await
  .unwrap();

  let window = s.list_games(2, 1).await.unwrap();
  assert_eq!(window.len(), 2);
  let all = s.list_games(10, 0).await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(window[0].id, all[1].id);
}

// ─── Through the query engine ────────────────────────────────────────────────

#[tokio::test]
async fn query_service_resolves_wins_from_the_players_point_of_view() {
  let s = store().await;
  s.ingest_games(vec![
    game("Ann", "Bob", "1-0", "B90", None),
    game("Bob", "Ann", "1-0", "C60", None),
  ])
  .await
  .unwrap();

  let svc = QueryService::new(Arc::new(s));
  let wins = svc
    .wins("ann", &GameFilter::default(), GameOrder::default(), Page::new(10, 0))
    .await
    .unwrap();

  // Ann won the first game as white; she lost the second as black.
  assert_eq!(wins.len(), 1);
  let view = &wins[0];
  assert_eq!(view.my_color, Some(Color::White));
  assert_eq!(view.pov_result, Some(PovResult::Win));
  assert_eq!(view.family, OpeningFamily::SicilianDefense);
  assert_eq!(view.eco.as_deref(), Some("B90"));

  let losses = svc
    .losses("ann", &GameFilter::default(), GameOrder::default(), Page::new(10, 0))
    .await
    .unwrap();
  assert_eq!(losses.len(), 1);
  assert_eq!(losses[0].family, OpeningFamily::RuyLopez);
}
