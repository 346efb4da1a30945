//! Typed row identifiers.
//!
//! Every table uses an integer primary key; wrapping each in its own newtype
//! keeps a pet id from being passed where a clinic id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> Self { id.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

row_id!(
  /// Primary key of the `clinics` table.
  ClinicId
);
row_id!(
  /// Primary key of the `veterinarians` table.
  VetId
);
row_id!(
  /// Primary key of the `owners` table.
  OwnerId
);
row_id!(
  /// Primary key of the `pets` table.
  PetId
);
row_id!(
  /// Primary key of the `visits` table.
  VisitId
);
row_id!(
  /// Primary key of the `vaccinations` table.
  VaccinationId
);
