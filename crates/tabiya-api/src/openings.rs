//! Handler for `GET /openings/classify`.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use tabiya_core::OpeningFamily;

#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
  pub eco:  Option<String>,
  pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
  pub eco:    Option<String>,
  pub name:   Option<String>,
  pub family: OpeningFamily,
}

/// `GET /openings/classify[?eco=B90][&name=Najdorf]`
///
/// Total: any input, including none at all, classifies to some family.
pub async fn classify(Query(params): Query<ClassifyParams>) -> Json<ClassifyResponse> {
  let family = tabiya_core::classify(params.eco.as_deref(), params.name.as_deref());
  Json(ClassifyResponse { eco: params.eco, name: params.name, family })
}
