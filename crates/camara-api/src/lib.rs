//! JSON REST API over the legislative data mirror.
//!
//! Exposes an axum [`Router`] backed by any [`LegislativeStore`] and any
//! [`Upstream`]. Reads go to the store; proposals and the sync trigger go
//! through the [`SyncPipeline`](camara_sync::SyncPipeline) in [`AppState`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = camara_api::router(state).layer(TraceLayer::new_for_http());
//! ```

pub mod error;
pub mod legislators;
pub mod meta;
pub mod params;
pub mod ranking;
pub mod state;
pub mod stats;
pub mod sync;

use axum::{
  Router,
  http::{Method, header},
  routing::{get, post},
};
use camara_core::store::LegislativeStore;
use camara_upstream::Upstream;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use state::AppState;

/// Build the full application router: the banner at `/` and every endpoint
/// under `/api`, with CORS open to any origin.
pub fn router<S, U>(state: AppState<S, U>) -> Router<()>
where
  S: LegislativeStore + 'static,
  U: Upstream + 'static,
{
  let api = Router::new()
    // Legislators
    .route("/deputados", get(legislators::list::<S, U>))
    .route("/deputados/{id}/gastos", get(legislators::expenses::<S, U>))
    .route("/deputados/{id}/projetos", get(legislators::projects::<S, U>))
    // Aggregates
    .route("/ranking", get(ranking::handler::<S, U>))
    .route("/estatisticas", get(stats::handler::<S, U>))
    // Sync
    .route("/sync", post(sync::trigger::<S, U>))
    .route("/health", get(meta::health));

  Router::new()
    .route("/", get(meta::banner))
    .nest("/api", api)
    .with_state(state)
    .layer(cors())
}

fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

#[cfg(test)]
mod tests;
