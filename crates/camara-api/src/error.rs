//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use camara_sync::SyncError;
use camara_upstream::UpstreamError;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// An error returned by an API handler. Its message becomes the `{error}`
/// body, so every variant renders in Portuguese.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Upstream(#[from] UpstreamError),

  #[error(transparent)]
  Sync(#[from] SyncError),

  #[error("A sincronização foi interrompida: {0}")]
  SyncTask(#[from] JoinError),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Sync(SyncError::AlreadyRunning) => StatusCode::CONFLICT,
      ApiError::Store(_) | ApiError::Upstream(_) | ApiError::Sync(_) | ApiError::SyncTask(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let message = self.to_string();
    if status.is_server_error() {
      error!(error = %message, "request failed");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
