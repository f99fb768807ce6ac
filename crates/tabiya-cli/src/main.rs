//! `tabiya` — command-line client for the Tabiya chess-analytics API.
//!
//! # Usage
//!
//! ```
//! tabiya --url http://localhost:8106 ingest WolfOnTheBoard 2025 9
//! tabiya wins --username wolfontheboard --family "Sicilian Defense"
//! tabiya classify --eco B90
//! ```

mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tabiya", about = "Query and ingest Chess.com games")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the tabiya server (default: http://localhost:8106).
  #[arg(long, env = "TABIYA_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List a player's games with optional filters.
  Games {
    #[command(flatten)]
    filters: FilterArgs,
    /// win, loss, or draw, from the player's point of view.
    #[arg(long)]
    result: Option<String>,
  },
  /// Games the player won.
  Wins {
    #[command(flatten)]
    filters: FilterArgs,
  },
  /// Games the player lost.
  Losses {
    #[command(flatten)]
    filters: FilterArgs,
  },
  /// Games the player drew.
  Draws {
    #[command(flatten)]
    filters: FilterArgs,
  },
  /// Classify an opening by ECO code and/or name.
  Classify {
    #[arg(long)]
    eco:  Option<String>,
    #[arg(long)]
    name: Option<String>,
  },
  /// Fetch and store one month of a player's archive.
  Ingest {
    username: String,
    year:     u16,
    month:    u8,
  },
  /// Fetch and store every month of a player's archive.
  Backfill { username: String },
}

/// Filters shared by every query subcommand; these map one-to-one onto the
/// API's query params.
#[derive(clap::Args, Debug)]
struct FilterArgs {
  /// Player whose games to query.
  #[arg(long)]
  username: String,

  /// Substring match on the opening name.
  #[arg(long)]
  opening_like: Option<String>,

  /// ECO code prefix, e.g. B9.
  #[arg(long)]
  eco_prefix: Option<String>,

  /// Opening family label, e.g. "Sicilian Defense".
  #[arg(long)]
  family: Option<String>,

  /// white or black.
  #[arg(long)]
  color: Option<String>,

  #[arg(long, default_value_t = 50)]
  limit: usize,

  #[arg(long, default_value_t = 0)]
  offset: usize,
}

impl FilterArgs {
  fn query(&self, result: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![
      ("username", self.username.clone()),
      ("limit", self.limit.to_string()),
      ("offset", self.offset.to_string()),
    ];
    if let Some(v) = &self.opening_like {
      query.push(("opening_like", v.clone()));
    }
    if let Some(v) = &self.eco_prefix {
      query.push(("eco_prefix", v.clone()));
    }
    if let Some(v) = &self.family {
      query.push(("family", v.clone()));
    }
    if let Some(v) = &self.color {
      query.push(("color", v.clone()));
    }
    if let Some(v) = result {
      query.push(("result", v.to_owned()));
    }
    query
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then_some(file_cfg.url))
    .unwrap_or_else(|| "http://localhost:8106".to_owned());

  let client = ApiClient::new(ApiConfig { base_url })?;

  let value = match &args.command {
    Command::Games { filters, result } => {
      client.games(None, &filters.query(result.as_deref())).await?
    }
    Command::Wins { filters } => client.games(Some("wins"), &filters.query(None)).await?,
    Command::Losses { filters } => client.games(Some("losses"), &filters.query(None)).await?,
    Command::Draws { filters } => client.games(Some("draws"), &filters.query(None)).await?,
    Command::Classify { eco, name } => client.classify(eco.clone(), name.clone()).await?,
    Command::Ingest { username, year, month } => {
      client.ingest_month(username, *year, *month).await?
    }
    Command::Backfill { username } => client.backfill(username).await?,
  };

  println!("{}", serde_json::to_string_pretty(&value)?);
  Ok(())
}
