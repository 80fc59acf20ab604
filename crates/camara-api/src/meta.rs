//! Service banner and health check.

use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

const ENDPOINTS: &[&str] = &[
  "GET  /api/deputados",
  "GET  /api/deputados/{id}/gastos?ano=2024",
  "GET  /api/deputados/{id}/projetos",
  "GET  /api/ranking?ano=2024&limite=20",
  "GET  /api/estatisticas",
  "POST /api/sync",
  "GET  /api/health",
];

/// `GET /`
pub async fn banner() -> Json<Value> {
  Json(json!({
    "message":   "Portal da Transparência API",
    "version":   env!("CARGO_PKG_VERSION"),
    "endpoints": ENDPOINTS,
  }))
}

/// `GET /health`
pub async fn health() -> Json<Value> { Json(json!({ "status": "ok", "time": Utc::now() })) }
