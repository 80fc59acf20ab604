//! `GET /ranking[?ano=<year>&limite=<n>]`

use axum::{
  Json,
  extract::{Query, State},
};
use camara_core::{ranking::RankingEntry, store::LegislativeStore};
use camara_upstream::Upstream;
use serde::Deserialize;

use crate::{error::ApiError, params, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RankingParams {
  pub ano:    Option<String>,
  pub limite: Option<String>,
}

pub async fn handler<S, U>(
  State(state): State<AppState<S, U>>,
  Query(params): Query<RankingParams>,
) -> Result<Json<Vec<RankingEntry>>, ApiError>
where
  S: LegislativeStore,
  U: Upstream,
{
  let year = params::year(params.ano.as_deref())?;
  let limit = params::limit(params.limite.as_deref())?;

  let ranking = state
    .store
    .compute_ranking(year, limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ranking))
}
