//! Path and query parameter parsing.
//!
//! Parameters are taken as raw strings and parsed here so a bad value gets
//! the JSON error body instead of axum's plain-text rejection. An empty
//! query value counts as absent.

use camara_core::{DEFAULT_YEAR, ranking::DEFAULT_LIMIT};

use crate::error::ApiError;

fn present(raw: Option<&str>) -> Option<&str> { raw.map(str::trim).filter(|s| !s.is_empty()) }

pub fn legislator_id(raw: &str) -> Result<i64, ApiError> {
  raw
    .trim()
    .parse()
    .map_err(|_| ApiError::BadRequest("ID inválido".into()))
}

pub fn year(raw: Option<&str>) -> Result<i32, ApiError> {
  match present(raw) {
    None => Ok(DEFAULT_YEAR),
    Some(s) => s
      .parse()
      .map_err(|_| ApiError::BadRequest("Ano inválido".into())),
  }
}

/// Ranking size. Negative values are rejected rather than meaning
/// "unlimited".
pub fn limit(raw: Option<&str>) -> Result<u32, ApiError> {
  match present(raw) {
    None => Ok(DEFAULT_LIMIT),
    Some(s) => s
      .parse()
      .map_err(|_| ApiError::BadRequest("Limite inválido".into())),
  }
}
