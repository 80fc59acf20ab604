//! Handlers for `/deputados` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/deputados` | Ordered by name |
//! | `GET`  | `/deputados/{id}/gastos` | Optional `?ano=`, default 2024 |
//! | `GET`  | `/deputados/{id}/projetos` | Fetched live from upstream |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use camara_core::{
  expense::Expense, legislator::Legislator, project::Project, store::LegislativeStore,
};
use camara_upstream::Upstream;
use serde::Deserialize;
use tracing::info;

use crate::{error::ApiError, params, state::AppState};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /deputados`
pub async fn list<S, U>(
  State(state): State<AppState<S, U>>,
) -> Result<Json<Vec<Legislator>>, ApiError>
where
  S: LegislativeStore,
  U: Upstream,
{
  let legislators = state
    .store
    .list_legislators()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(legislators))
}

// ─── Expenses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExpenseParams {
  pub ano: Option<String>,
}

/// `GET /deputados/{id}/gastos[?ano=<year>]`
pub async fn expenses<S, U>(
  State(state): State<AppState<S, U>>,
  Path(id): Path<String>,
  Query(params): Query<ExpenseParams>,
) -> Result<Json<Vec<Expense>>, ApiError>
where
  S: LegislativeStore,
  U: Upstream,
{
  let id = params::legislator_id(&id)?;
  let year = params::year(params.ano.as_deref())?;

  let expenses = state
    .store
    .list_expenses(id, year)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(expenses))
}

// ─── Projects ─────────────────────────────────────────────────────────────────

/// `GET /deputados/{id}/projetos`
pub async fn projects<S, U>(
  State(state): State<AppState<S, U>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Project>>, ApiError>
where
  S: LegislativeStore,
  U: Upstream,
{
  let id = params::legislator_id(&id)?;
  let projects = state.sync.fetch_projects(id).await?;
  info!(legislator = id, count = projects.len(), "projects served");
  Ok(Json(projects))
}
