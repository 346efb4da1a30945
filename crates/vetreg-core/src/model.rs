//! Entity types: one struct per table, plus the `New*` input used to insert
//! or fully replace a row.
//!
//! Server-assigned fields (row ids, the visit counter) never appear in the
//! inputs. Optional dates in the inputs fall back to the registry clock.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::id::{ClinicId, OwnerId, PetId, VaccinationId, VetId, VisitId};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// The six record types of the registry.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
  Clinic,
  Veterinarian,
  Owner,
  Pet,
  Visit,
  Vaccination,
}

impl Entity {
  /// Name of the backing table.
  pub fn table(self) -> &'static str {
    match self {
      Self::Clinic => "clinics",
      Self::Veterinarian => "veterinarians",
      Self::Owner => "owners",
      Self::Pet => "pets",
      Self::Visit => "visits",
      Self::Vaccination => "vaccinations",
    }
  }
}

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
pub enum Gender {
  #[serde(rename = "M")]
  #[strum(serialize = "M")]
  Male,
  #[serde(rename = "F")]
  #[strum(serialize = "F")]
  Female,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisitStatus {
  #[default]
  Scheduled,
  Completed,
  Cancelled,
}

// ─── Clinic ──────────────────────────────────────────────────────────────────

/// A physical veterinary practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
  pub clinic_id:     ClinicId,
  pub name:          String,
  /// Unique across clinics.
  pub address:       String,
  /// Unique across clinics.
  pub phone:         String,
  pub email:         Option<String>,
  pub website:       Option<String>,
  pub opening_date:  NaiveDate,
  /// Free text, e.g. `"09:00-21:00"`.
  pub working_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClinic {
  pub name:          String,
  pub address:       String,
  pub phone:         String,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub website:       Option<String>,
  pub opening_date:  NaiveDate,
  pub working_hours: String,
}

// ─── Veterinarian ────────────────────────────────────────────────────────────

/// A staff member employed by exactly one clinic. Deleted with the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Veterinarian {
  pub vet_id:         VetId,
  pub clinic_id:      ClinicId,
  pub first_name:     String,
  pub last_name:      String,
  pub specialization: String,
  pub license_number: String,
  pub hire_date:      NaiveDate,
  pub salary:         Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVeterinarian {
  pub clinic_id:      ClinicId,
  pub first_name:     String,
  pub last_name:      String,
  pub specialization: String,
  pub license_number: String,
  pub hire_date:      NaiveDate,
  pub salary:         Decimal,
}

// ─── Owner ───────────────────────────────────────────────────────────────────

/// A person who may own several pets. The phone number is the natural key
/// used by pet registration and transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
  pub owner_id:          OwnerId,
  pub first_name:        String,
  pub last_name:         String,
  pub phone:             String,
  pub email:             Option<String>,
  pub address:           Option<String>,
  pub registration_date: NaiveDate,
}

impl Owner {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOwner {
  pub first_name:        String,
  pub last_name:         String,
  pub phone:             String,
  #[serde(default)]
  pub email:             Option<String>,
  #[serde(default)]
  pub address:           Option<String>,
  /// Defaults to today.
  #[serde(default)]
  pub registration_date: Option<NaiveDate>,
}

impl NewOwner {
  /// An owner known only by name and phone, as created implicitly by pet
  /// registration and transfer.
  pub fn contact(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    phone: impl Into<String>,
  ) -> Self {
    Self {
      first_name:        first_name.into(),
      last_name:         last_name.into(),
      phone:             phone.into(),
      email:             None,
      address:           None,
      registration_date: None,
    }
  }
}

// ─── Pet ─────────────────────────────────────────────────────────────────────

/// An animal belonging to exactly one owner. Deleted with the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
  pub pet_id:            PetId,
  pub owner_id:          OwnerId,
  pub name:              String,
  pub species:           String,
  pub breed:             Option<String>,
  pub birth_date:        Option<NaiveDate>,
  pub gender:            Gender,
  /// Unique when present.
  pub chip_number:       Option<String>,
  pub registration_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPet {
  pub owner_id:          OwnerId,
  pub name:              String,
  pub species:           String,
  #[serde(default)]
  pub breed:             Option<String>,
  #[serde(default)]
  pub birth_date:        Option<NaiveDate>,
  pub gender:            Gender,
  #[serde(default)]
  pub chip_number:       Option<String>,
  /// Defaults to today.
  #[serde(default)]
  pub registration_date: Option<NaiveDate>,
}

// ─── Visit ───────────────────────────────────────────────────────────────────

/// A single clinical encounter. Survives deletion of its veterinarian or
/// clinic as an orphaned historical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
  pub visit_id:           VisitId,
  pub pet_id:             PetId,
  pub vet_id:             Option<VetId>,
  pub clinic_id:          Option<ClinicId>,
  pub visit_date:         NaiveDateTime,
  pub diagnosis:          Option<String>,
  pub treatment:          Option<String>,
  pub cost:               Option<Decimal>,
  pub status:             VisitStatus,
  /// Number of visits the pet had when this row was inserted, this one
  /// included. A snapshot; later inserts do not touch it.
  pub total_visits_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisit {
  pub pet_id:     PetId,
  #[serde(default)]
  pub vet_id:     Option<VetId>,
  #[serde(default)]
  pub clinic_id:  Option<ClinicId>,
  /// Defaults to now.
  #[serde(default)]
  pub visit_date: Option<NaiveDateTime>,
  #[serde(default)]
  pub diagnosis:  Option<String>,
  #[serde(default)]
  pub treatment:  Option<String>,
  #[serde(default)]
  pub cost:       Option<Decimal>,
  #[serde(default)]
  pub status:     VisitStatus,
}

// ─── Vaccination ─────────────────────────────────────────────────────────────

/// An administered vaccine dose and its follow-up due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccination {
  pub vaccination_id:        VaccinationId,
  pub pet_id:                PetId,
  pub vet_id:                Option<VetId>,
  pub clinic_id:             Option<ClinicId>,
  pub vaccine_name:          String,
  pub vaccination_date:      NaiveDate,
  pub next_vaccination_date: NaiveDate,
  pub batch_number:          Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVaccination {
  pub pet_id:                PetId,
  #[serde(default)]
  pub vet_id:                Option<VetId>,
  #[serde(default)]
  pub clinic_id:             Option<ClinicId>,
  pub vaccine_name:          String,
  /// Defaults to today on insert; on update, `None` keeps the stored date.
  #[serde(default)]
  pub vaccination_date:      Option<NaiveDate>,
  /// See [`crate::rules::initial_vaccination_dates`] and
  /// [`crate::rules::apply_vaccination_update`] for how this is resolved.
  #[serde(default)]
  pub next_vaccination_date: Option<NaiveDate>,
  #[serde(default)]
  pub batch_number:          Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enums_use_storage_spellings() {
    assert_eq!(Gender::Male.to_string(), "M");
    assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!(VisitStatus::Cancelled.to_string(), "cancelled");
    assert_eq!(
      "completed".parse::<VisitStatus>().unwrap(),
      VisitStatus::Completed
    );
    assert!("X".parse::<Gender>().is_err());
    assert_eq!(Entity::Veterinarian.to_string(), "veterinarian");
    assert_eq!(Entity::Vaccination.table(), "vaccinations");
  }

  #[test]
  fn serde_matches_strum() {
    let json = serde_json::to_string(&Gender::Female).unwrap();
    assert_eq!(json, "\"F\"");
    let status: VisitStatus = serde_json::from_str("\"scheduled\"").unwrap();
    assert_eq!(status, VisitStatus::Scheduled);
  }

  #[test]
  fn new_visit_defaults() {
    let v: NewVisit = serde_json::from_str(r#"{"pet_id": 4}"#).unwrap();
    assert_eq!(v.pet_id, PetId(4));
    assert_eq!(v.status, VisitStatus::Scheduled);
    assert!(v.visit_date.is_none());
  }
}
