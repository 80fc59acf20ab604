//! Error types for the sync pipeline.
//!
//! Messages are in Portuguese: they end up in the `{error}` body of the
//! sync endpoint.

use std::fmt;

use camara_upstream::UpstreamError;
use thiserror::Error;

/// The part of a full run that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
  Legislators,
  Expenses { year: i32 },
}

impl fmt::Display for SyncStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SyncStep::Legislators => f.write_str("deputados"),
      SyncStep::Expenses { year } => write!(f, "gastos de {year}"),
    }
  }
}

#[derive(Debug, Error)]
pub enum SyncError {
  #[error(transparent)]
  Upstream(#[from] UpstreamError),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("Sincronização já em andamento")]
  AlreadyRunning,

  #[error("Erro ao sincronizar {step}: {source}")]
  Step {
    step:   SyncStep,
    #[source]
    source: Box<SyncError>,
  },
}

impl SyncError {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// Attribute this error to `step` of a full run.
  pub(crate) fn during(self, step: SyncStep) -> Self {
    Self::Step {
      step,
      source: Box::new(self),
    }
  }

  /// The failing step, if this error came out of a full run.
  pub fn step(&self) -> Option<SyncStep> {
    match self {
      Self::Step { step, .. } => Some(*step),
      _ => None,
    }
  }
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
