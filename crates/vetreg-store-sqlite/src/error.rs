//! Error type for `vetreg-store-sqlite`.

use thiserror::Error;
use vetreg_core::{ErrorKind, RegistryError};

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] vetreg_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),
}

/// Constraint failures become [`vetreg_core::Error::Constraint`] so callers
/// can tell a rejected write from a broken database.
impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        code,
        message,
      )) if code.code == rusqlite::ErrorCode::ConstraintViolation => {
        let message = message.unwrap_or_else(|| code.to_string());
        Self::Core(vetreg_core::Error::Constraint(message))
      }
      other => Self::Database(other),
    }
  }
}

impl RegistryError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(e) => e.kind(),
      Self::Database(_) => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
