//! Single-flight guard for full sync runs.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{Result, SyncError};

/// Allows at most one holder at a time. A second caller is turned away
/// immediately rather than queued.
#[derive(Debug, Clone, Default)]
pub struct SyncGate {
  lock: Arc<Mutex<()>>,
}

/// Held for the duration of a run; releases the gate on drop.
#[derive(Debug)]
pub struct SyncPermit {
  _guard: OwnedMutexGuard<()>,
}

impl SyncGate {
  pub fn try_acquire(&self) -> Result<SyncPermit> {
    Arc::clone(&self.lock)
      .try_lock_owned()
      .map(|guard| SyncPermit { _guard: guard })
      .map_err(|_| SyncError::AlreadyRunning)
  }
}
