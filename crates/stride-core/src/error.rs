//! Error types for `stride-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown difficulty tier: {0:?}")]
  UnknownDifficulty(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
