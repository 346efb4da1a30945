//! The `ClinicRegistry` trait.
//!
//! The trait is implemented by storage backends (e.g. `vetreg-store-sqlite`).
//! Higher layers (`vetreg-api`, `vetreg-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  error::RegistryError,
  id::{ClinicId, OwnerId, PetId, VaccinationId, VetId, VisitId},
  model::{
    Clinic, NewClinic, NewOwner, NewPet, NewVaccination, NewVeterinarian,
    NewVisit, Owner, Pet, Vaccination, Veterinarian, Visit,
  },
  report::{
    AddVaccination, PetRegistration, PetTransfer, RegisterPet, RevenueSummary,
    ScheduleVisit, TransferPet, VaccinationReminder,
  },
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a clinic registry backend.
///
/// Every method is one unit of work: multi-statement operations either
/// complete or leave the store untouched. Updates replace the whole row;
/// updating or deleting a missing row fails with
/// [`NotFound`](crate::Error::NotFound).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ClinicRegistry: Send + Sync {
  type Error: RegistryError;

  // ── Clinics ───────────────────────────────────────────────────────────

  fn create_clinic(
    &self,
    input: NewClinic,
  ) -> impl Future<Output = Result<Clinic, Self::Error>> + Send + '_;

  fn get_clinic(
    &self,
    id: ClinicId,
  ) -> impl Future<Output = Result<Option<Clinic>, Self::Error>> + Send + '_;

  fn list_clinics(
    &self,
  ) -> impl Future<Output = Result<Vec<Clinic>, Self::Error>> + Send + '_;

  fn update_clinic(
    &self,
    id: ClinicId,
    input: NewClinic,
  ) -> impl Future<Output = Result<Clinic, Self::Error>> + Send + '_;

  /// Deletes the clinic and its veterinarians; visits and vaccinations keep
  /// their rows with the clinic reference cleared.
  fn delete_clinic(
    &self,
    id: ClinicId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Veterinarians ─────────────────────────────────────────────────────

  fn create_veterinarian(
    &self,
    input: NewVeterinarian,
  ) -> impl Future<Output = Result<Veterinarian, Self::Error>> + Send + '_;

  fn get_veterinarian(
    &self,
    id: VetId,
  ) -> impl Future<Output = Result<Option<Veterinarian>, Self::Error>> + Send + '_;

  /// List veterinarians, optionally only those of one clinic.
  fn list_veterinarians(
    &self,
    clinic: Option<ClinicId>,
  ) -> impl Future<Output = Result<Vec<Veterinarian>, Self::Error>> + Send + '_;

  fn update_veterinarian(
    &self,
    id: VetId,
    input: NewVeterinarian,
  ) -> impl Future<Output = Result<Veterinarian, Self::Error>> + Send + '_;

  /// Deletes the veterinarian; their visits and vaccinations are kept with
  /// the reference cleared.
  fn delete_veterinarian(
    &self,
    id: VetId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Owners ────────────────────────────────────────────────────────────

  fn create_owner(
    &self,
    input: NewOwner,
  ) -> impl Future<Output = Result<Owner, Self::Error>> + Send + '_;

  fn get_owner(
    &self,
    id: OwnerId,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  fn list_owners(
    &self,
  ) -> impl Future<Output = Result<Vec<Owner>, Self::Error>> + Send + '_;

  fn update_owner(
    &self,
    id: OwnerId,
    input: NewOwner,
  ) -> impl Future<Output = Result<Owner, Self::Error>> + Send + '_;

  /// Deletes the owner together with their pets and, through the pets, all
  /// of those pets' visits and vaccinations.
  fn delete_owner(
    &self,
    id: OwnerId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Pets ──────────────────────────────────────────────────────────────

  fn create_pet(
    &self,
    input: NewPet,
  ) -> impl Future<Output = Result<Pet, Self::Error>> + Send + '_;

  fn get_pet(
    &self,
    id: PetId,
  ) -> impl Future<Output = Result<Option<Pet>, Self::Error>> + Send + '_;

  /// List pets, optionally only those of one owner.
  fn list_pets(
    &self,
    owner: Option<OwnerId>,
  ) -> impl Future<Output = Result<Vec<Pet>, Self::Error>> + Send + '_;

  fn update_pet(
    &self,
    id: PetId,
    input: NewPet,
  ) -> impl Future<Output = Result<Pet, Self::Error>> + Send + '_;

  fn delete_pet(
    &self,
    id: PetId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Visits ────────────────────────────────────────────────────────────

  /// Insert a visit and stamp it with the pet's running visit count.
  /// No double-booking check; see [`ClinicRegistry::schedule_visit`].
  fn create_visit(
    &self,
    input: NewVisit,
  ) -> impl Future<Output = Result<Visit, Self::Error>> + Send + '_;

  fn get_visit(
    &self,
    id: VisitId,
  ) -> impl Future<Output = Result<Option<Visit>, Self::Error>> + Send + '_;

  /// List visits ordered by date, optionally only those of one pet.
  fn list_visits(
    &self,
    pet: Option<PetId>,
  ) -> impl Future<Output = Result<Vec<Visit>, Self::Error>> + Send + '_;

  /// Replace a visit. The stored visit counter is left as it was.
  fn update_visit(
    &self,
    id: VisitId,
    input: NewVisit,
  ) -> impl Future<Output = Result<Visit, Self::Error>> + Send + '_;

  fn delete_visit(
    &self,
    id: VisitId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Vaccinations ──────────────────────────────────────────────────────

  fn create_vaccination(
    &self,
    input: NewVaccination,
  ) -> impl Future<Output = Result<Vaccination, Self::Error>> + Send + '_;

  fn get_vaccination(
    &self,
    id: VaccinationId,
  ) -> impl Future<Output = Result<Option<Vaccination>, Self::Error>> + Send + '_;

  /// List vaccinations ordered by date, optionally only those of one pet.
  fn list_vaccinations(
    &self,
    pet: Option<PetId>,
  ) -> impl Future<Output = Result<Vec<Vaccination>, Self::Error>> + Send + '_;

  /// Replace a vaccination, resolving the due date with
  /// [`crate::rules::apply_vaccination_update`].
  fn update_vaccination(
    &self,
    id: VaccinationId,
    input: NewVaccination,
  ) -> impl Future<Output = Result<Vaccination, Self::Error>> + Send + '_;

  fn delete_vaccination(
    &self,
    id: VaccinationId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Move a vaccination to `vaccination_date`; the due date follows.
  fn reschedule_vaccination(
    &self,
    id: VaccinationId,
    vaccination_date: NaiveDate,
  ) -> impl Future<Output = Result<Vaccination, Self::Error>> + Send + '_;

  // ── Operations ────────────────────────────────────────────────────────

  /// Find or create the owner by phone, then insert the pet under them.
  fn register_pet(
    &self,
    input: RegisterPet,
  ) -> impl Future<Output = Result<PetRegistration, Self::Error>> + Send + '_;

  /// Book a visit with status `scheduled`.
  ///
  /// Fails with [`VeterinarianBusy`](crate::Error::VeterinarianBusy) if the
  /// veterinarian has a visit that is not cancelled within
  /// [`crate::rules::booking_window`] of the requested time.
  fn schedule_visit(
    &self,
    input: ScheduleVisit,
  ) -> impl Future<Output = Result<Visit, Self::Error>> + Send + '_;

  /// Sum and count of completed visits of `clinic` on days `from..=to`.
  fn clinic_revenue(
    &self,
    clinic: ClinicId,
    from: NaiveDate,
    to: NaiveDate,
  ) -> impl Future<Output = Result<RevenueSummary, Self::Error>> + Send + '_;

  /// Vaccinations due between today and today + `days_ahead`, soonest
  /// first.
  fn vaccination_reminders(
    &self,
    days_ahead: u32,
  ) -> impl Future<Output = Result<Vec<VaccinationReminder>, Self::Error>> + Send + '_;

  /// Find or create the new owner by phone and repoint the pet to them.
  fn transfer_pet(
    &self,
    input: TransferPet,
  ) -> impl Future<Output = Result<PetTransfer, Self::Error>> + Send + '_;

  /// Record a vaccination given today, due again in one year.
  fn add_vaccination(
    &self,
    input: AddVaccination,
  ) -> impl Future<Output = Result<Vaccination, Self::Error>> + Send + '_;
}
