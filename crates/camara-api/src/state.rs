use std::sync::Arc;

use camara_sync::SyncPipeline;

/// Shared state threaded through all handlers.
pub struct AppState<S, U> {
  pub store: Arc<S>,
  pub sync:  SyncPipeline<S, U>,
}

impl<S, U> Clone for AppState<S, U> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      sync:  self.sync.clone(),
    }
  }
}
