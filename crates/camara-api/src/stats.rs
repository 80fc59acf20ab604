//! `GET /estatisticas`

use axum::{Json, extract::State};
use camara_core::store::LegislativeStore;
use camara_upstream::Upstream;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct Stats {
  #[serde(rename = "totalDeputados")]
  pub legislators:   u64,
  #[serde(rename = "totalGastos2024")]
  pub expenses_2024: u64,
  #[serde(rename = "totalGastos2025")]
  pub expenses_2025: u64,
  /// `null` until the first legislator sync.
  #[serde(rename = "ultimaAtualizacao")]
  pub last_updated:  Option<DateTime<Utc>>,
}

pub async fn handler<S, U>(State(state): State<AppState<S, U>>) -> Result<Json<Stats>, ApiError>
where
  S: LegislativeStore,
  U: Upstream,
{
  let store = &state.store;
  Ok(Json(Stats {
    legislators:   store.count_legislators().await.map_err(ApiError::store)?,
    expenses_2024: store.count_expenses(2024).await.map_err(ApiError::store)?,
    expenses_2025: store.count_expenses(2025).await.map_err(ApiError::store)?,
    last_updated:  store.last_updated().await.map_err(ApiError::store)?,
  }))
}
