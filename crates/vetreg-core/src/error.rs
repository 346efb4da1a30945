//! Error types for `vetreg-core`.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{
  id::{VetId, VisitId},
  model::Entity,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: i64 },

  /// Another booking of the same veterinarian falls inside the booking
  /// window around `at`.
  #[error("veterinarian {vet} is busy at {at} (visit {conflicting})")]
  VeterinarianBusy {
    vet:         VetId,
    at:          NaiveDateTime,
    conflicting: VisitId,
  },

  #[error("invalid {field}: {reason}")]
  Validation { field: &'static str, reason: String },

  /// A uniqueness, check, or foreign-key constraint rejected the write.
  #[error("constraint violation: {0}")]
  Constraint(String),
}

impl Error {
  pub fn not_found(entity: Entity, id: impl Into<i64>) -> Self {
    Self::NotFound { entity, id: id.into() }
  }

  pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// Coarse failure class, used by transport layers to pick a status code
/// without knowing the concrete backend error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  /// Double booking or a violated storage constraint.
  Conflict,
  Invalid,
  Internal,
}

/// Implemented by every error type a [`crate::registry::ClinicRegistry`]
/// backend can return.
pub trait RegistryError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

impl RegistryError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::VeterinarianBusy { .. } | Self::Constraint(_) => {
        ErrorKind::Conflict
      }
      Self::Validation { .. } => ErrorKind::Invalid,
    }
  }
}
