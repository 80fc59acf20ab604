//! `POST /sync`: run one full sync and report what it did.

use axum::{Json, extract::State};
use camara_core::store::LegislativeStore;
use camara_sync::RunSummary;
use camara_upstream::Upstream;
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct SyncResponse {
  pub message: &'static str,
  pub summary: RunSummary,
}

/// Waits for the run to finish. A second trigger while one is running gets
/// `409` immediately.
///
/// The run is spawned onto its own task, so a client that hangs up does not
/// cancel it halfway; the task keeps the gate until the run is over.
pub async fn trigger<S, U>(
  State(state): State<AppState<S, U>>,
) -> Result<Json<SyncResponse>, ApiError>
where
  S: LegislativeStore + 'static,
  U: Upstream + 'static,
{
  let pipeline = state.sync.clone();
  let summary = tokio::spawn(async move { pipeline.run_full().await }).await??;
  Ok(Json(SyncResponse {
    message: "Sincronização concluída com sucesso!",
    summary,
  }))
}
