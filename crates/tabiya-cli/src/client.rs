//! Async HTTP client wrapping the tabiya JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::Value;

/// Connection settings for the tabiya API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the tabiya JSON REST API.
///
/// Responses are passed through as JSON values — the CLI renders them, it
/// does not interpret them.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp.json().await.context("deserialising response")
  }

  async fn post_json(&self, path: &str) -> Result<Value> {
    let resp = self
      .client
      .post(self.url(path))
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST {path} → {}", resp.status()));
    }
    resp.json().await.context("deserialising response")
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  /// `GET /games[/wins|/losses|/draws]` with the given query params.
  pub async fn games(&self, variant: Option<&str>, query: &[(&str, String)]) -> Result<Value> {
    let path = match variant {
      Some(v) => format!("/games/{v}"),
      None => "/games".to_owned(),
    };
    self.get_json(&path, query).await
  }

  /// `GET /openings/classify`
  pub async fn classify(&self, eco: Option<String>, name: Option<String>) -> Result<Value> {
    let mut query = Vec::new();
    if let Some(eco) = eco {
      query.push(("eco", eco));
    }
    if let Some(name) = name {
      query.push(("name", name));
    }
    self.get_json("/openings/classify", &query).await
  }

  // ── Ingest ────────────────────────────────────────────────────────────────

  /// `POST /ingest/{username}/{year}/{month}`
  pub async fn ingest_month(&self, username: &str, year: u16, month: u8) -> Result<Value> {
    self.post_json(&format!("/ingest/{username}/{year}/{month}")).await
  }

  /// `POST /ingest/{username}` — every archive month.
  pub async fn backfill(&self, username: &str) -> Result<Value> {
    self.post_json(&format!("/ingest/{username}")).await
  }
}
