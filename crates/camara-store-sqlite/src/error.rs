//! Error type for `camara-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("erro no banco de dados: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("data/hora inválida no banco: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
