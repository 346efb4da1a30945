//! Inputs and results of the registry operations.
//!
//! Each result type implements [`Display`](std::fmt::Display) as the
//! one-line confirmation shown to a user; callers decide whether to log,
//! print, or discard it.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  id::{ClinicId, PetId, VaccinationId, VetId},
  model::{Gender, Owner, Pet, Vaccination, Visit},
};

// ─── Pet registration ────────────────────────────────────────────────────────

/// Register a pet, creating its owner on the fly if no owner has this phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPet {
  pub owner_first_name: String,
  pub owner_last_name:  String,
  pub owner_phone:      String,
  pub name:             String,
  pub species:          String,
  #[serde(default)]
  pub breed:            Option<String>,
  #[serde(default)]
  pub birth_date:       Option<NaiveDate>,
  pub gender:           Gender,
  #[serde(default)]
  pub chip_number:      Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetRegistration {
  pub owner:         Owner,
  pub pet:           Pet,
  /// `false` when an existing owner with the same phone was reused.
  pub owner_created: bool,
}

impl fmt::Display for PetRegistration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Pet {} registered for owner {}",
      self.pet.name,
      self.owner.full_name()
    )
  }
}

// ─── Visit scheduling ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleVisit {
  pub pet_id:     PetId,
  pub vet_id:     VetId,
  pub clinic_id:  ClinicId,
  pub visit_date: NaiveDateTime,
  /// Stored as the visit's diagnosis.
  #[serde(default)]
  pub reason:     Option<String>,
}

/// Confirmation for a visit booked through scheduling.
pub fn visit_scheduled(visit: &Visit) -> String {
  format!("Visit scheduled for {}", visit.visit_date)
}

// ─── Revenue ─────────────────────────────────────────────────────────────────

/// Completed-visit revenue of one clinic over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
  pub clinic_id:     ClinicId,
  pub from:          NaiveDate,
  pub to:            NaiveDate,
  /// Zero, never absent, when nothing matched.
  pub total_revenue: Decimal,
  pub visit_count:   u32,
}

impl fmt::Display for RevenueSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Clinic {}: revenue from {} to {} is {} ({} visits)",
      self.clinic_id, self.from, self.to, self.total_revenue, self.visit_count
    )
  }
}

// ─── Reminders ───────────────────────────────────────────────────────────────

/// A vaccination falling due soon, with the owner's contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationReminder {
  pub vaccination_id:        VaccinationId,
  pub pet_id:                PetId,
  pub pet_name:              String,
  pub owner_first_name:      String,
  pub owner_last_name:       String,
  pub owner_phone:           String,
  pub owner_email:           Option<String>,
  pub vaccine_name:          String,
  pub next_vaccination_date: NaiveDate,
}

impl fmt::Display for VaccinationReminder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Pet: {}, Owner: {} {} (phone: {}, email: {}), Vaccine: {}, Due: {}",
      self.pet_name,
      self.owner_first_name,
      self.owner_last_name,
      self.owner_phone,
      self.owner_email.as_deref().unwrap_or("-"),
      self.vaccine_name,
      self.next_vaccination_date
    )
  }
}

// ─── Transfer ────────────────────────────────────────────────────────────────

/// Move a pet to the owner with `new_owner_phone`, creating that owner if
/// needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPet {
  pub pet_id:               PetId,
  pub new_owner_first_name: String,
  pub new_owner_last_name:  String,
  pub new_owner_phone:      String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetTransfer {
  /// The pet after the transfer.
  pub pet:                 Pet,
  pub previous_owner_name: String,
  pub new_owner:           Owner,
  pub owner_created:       bool,
}

impl fmt::Display for PetTransfer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Pet {} transferred from {} to new owner {}",
      self.pet.name,
      self.previous_owner_name,
      self.new_owner.full_name()
    )
  }
}

// ─── Vaccination ─────────────────────────────────────────────────────────────

/// Record a vaccination given today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddVaccination {
  pub pet_id:       PetId,
  pub vet_id:       VetId,
  pub clinic_id:    ClinicId,
  pub vaccine_name: String,
  #[serde(default)]
  pub batch_number: Option<String>,
}

/// Confirmation for a vaccination recorded through [`AddVaccination`].
pub fn vaccination_added(vaccination: &Vaccination) -> String {
  format!(
    "Vaccination {} added for pet ID {}",
    vaccination.vaccine_name, vaccination.pet_id
  )
}
