//! Error types for the upstream client.

use thiserror::Error;

/// A failure talking to the upstream open-data API.
///
/// Every variant aborts the unit of work that issued the request. Nothing is
/// retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
  #[error("falha ao acessar a API da Câmara: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("a API da Câmara respondeu HTTP {status} para {url}")]
  Status { status: u16, url: String },

  #[error("resposta inválida da API da Câmara em {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = UpstreamError> = std::result::Result<T, E>;
