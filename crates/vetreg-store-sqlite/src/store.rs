//! [`SqliteStore`]: the SQLite implementation of [`ClinicRegistry`].

use std::path::Path;

use chrono::{Days, NaiveDate};
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use vetreg_core::{
  Clock,
  id::{ClinicId, OwnerId, PetId, VaccinationId, VetId, VisitId},
  model::{
    Clinic, Entity, NewClinic, NewOwner, NewPet, NewVaccination,
    NewVeterinarian, NewVisit, Owner, Pet, Vaccination, Veterinarian, Visit,
    VisitStatus,
  },
  registry::ClinicRegistry,
  report::{
    self, AddVaccination, PetRegistration, PetTransfer, RegisterPet,
    RevenueSummary, ScheduleVisit, TransferPet, VaccinationReminder,
  },
  rules::{self, Validate as _},
};

use crate::{
  Error, Result,
  encode::decode_money,
  queries,
  schema::{SCHEMA, SEED},
};

fn missing(entity: Entity, id: impl Into<i64>) -> Error {
  vetreg_core::Error::not_found(entity, id).into()
}

/// Outcome of the conflict check and insert run by `schedule_visit`.
enum Booking {
  Booked(Visit),
  Busy(VisitId),
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clinic registry backed by a single SQLite file.
///
/// Clones share the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  clock: Clock,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, clock: Clock::System };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, clock: Clock::System };
    store.init_schema().await?;
    Ok(store)
  }

  /// Replace the clock used for defaults, date checks, and reminders.
  pub fn with_clock(mut self, clock: Clock) -> Self {
    self.clock = clock;
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert the demonstration data set if the store holds no rows at all.
  /// Returns whether anything was inserted.
  pub async fn seed_demo_data(&self) -> Result<bool> {
    let seeded = self
      .write(|tx| {
        if !queries::is_empty(tx)? {
          return Ok(false);
        }
        tx.execute_batch(SEED)?;
        Ok(true)
      })
      .await?;
    if seeded {
      info!("demo data inserted");
    } else {
      debug!("store already populated; demo data skipped");
    }
    Ok(seeded)
  }

  /// Run `f` on the connection thread outside an explicit transaction.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    Ok(self.conn.call(move |conn| Ok(f(conn)?)).await?)
  }

  /// Run `f` inside an `IMMEDIATE` transaction and commit if it succeeds.
  ///
  /// Taking the write lock up front serialises writers, so read-then-write
  /// sequences (visit counter, booking check, owner lookup) cannot
  /// interleave with another writer.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let out = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
      })
      .await?;
    Ok(out)
  }

  async fn delete(&self, entity: Entity, id: i64) -> Result<()> {
    let deleted = self
      .write(move |tx| queries::delete_row(tx, entity, id))
      .await?;
    if !deleted {
      return Err(missing(entity, id));
    }
    debug!(%entity, id, "row deleted");
    Ok(())
  }

  fn today(&self) -> NaiveDate { self.clock.today() }
}

// ─── ClinicRegistry impl ─────────────────────────────────────────────────────

impl ClinicRegistry for SqliteStore {
  type Error = Error;

  // ── Clinics ───────────────────────────────────────────────────────────────

  async fn create_clinic(&self, input: NewClinic) -> Result<Clinic> {
    input.validate(self.today())?;
    let clinic = self
      .write(move |tx| queries::insert_clinic(tx, &input))
      .await?;
    debug!(clinic_id = %clinic.clinic_id, "clinic created");
    Ok(clinic)
  }

  async fn get_clinic(&self, id: ClinicId) -> Result<Option<Clinic>> {
    self.read(move |conn| queries::select_clinic(conn, id)).await
  }

  async fn list_clinics(&self) -> Result<Vec<Clinic>> {
    self.read(queries::list_clinics).await
  }

  async fn update_clinic(
    &self,
    id: ClinicId,
    input: NewClinic,
  ) -> Result<Clinic> {
    input.validate(self.today())?;
    self
      .write(move |tx| queries::update_clinic(tx, id, &input))
      .await?
      .ok_or_else(|| missing(Entity::Clinic, id))
  }

  async fn delete_clinic(&self, id: ClinicId) -> Result<()> {
    self.delete(Entity::Clinic, id.get()).await
  }

  // ── Veterinarians ─────────────────────────────────────────────────────────

  async fn create_veterinarian(
    &self,
    input: NewVeterinarian,
  ) -> Result<Veterinarian> {
    input.validate(self.today())?;
    let vet = self
      .write(move |tx| queries::insert_veterinarian(tx, &input))
      .await?;
    debug!(
      vet_id = %vet.vet_id,
      clinic_id = %vet.clinic_id,
      "veterinarian created"
    );
    Ok(vet)
  }

  async fn get_veterinarian(&self, id: VetId) -> Result<Option<Veterinarian>> {
    self.read(move |conn| queries::select_veterinarian(conn, id)).await
  }

  async fn list_veterinarians(
    &self,
    clinic: Option<ClinicId>,
  ) -> Result<Vec<Veterinarian>> {
    self
      .read(move |conn| queries::list_veterinarians(conn, clinic))
      .await
  }

  async fn update_veterinarian(
    &self,
    id: VetId,
    input: NewVeterinarian,
  ) -> Result<Veterinarian> {
    input.validate(self.today())?;
    self
      .write(move |tx| queries::update_veterinarian(tx, id, &input))
      .await?
      .ok_or_else(|| missing(Entity::Veterinarian, id))
  }

  async fn delete_veterinarian(&self, id: VetId) -> Result<()> {
    self.delete(Entity::Veterinarian, id.get()).await
  }

  // ── Owners ────────────────────────────────────────────────────────────────

  async fn create_owner(&self, input: NewOwner) -> Result<Owner> {
    let today = self.today();
    input.validate(today)?;
    let owner = self
      .write(move |tx| queries::insert_owner(tx, &input, today))
      .await?;
    debug!(owner_id = %owner.owner_id, "owner created");
    Ok(owner)
  }

  async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>> {
    self.read(move |conn| queries::select_owner(conn, id)).await
  }

  async fn list_owners(&self) -> Result<Vec<Owner>> {
    self.read(queries::list_owners).await
  }

  async fn update_owner(&self, id: OwnerId, input: NewOwner) -> Result<Owner> {
    input.validate(self.today())?;
    self
      .write(move |tx| queries::update_owner(tx, id, &input))
      .await?
      .ok_or_else(|| missing(Entity::Owner, id))
  }

  async fn delete_owner(&self, id: OwnerId) -> Result<()> {
    self.delete(Entity::Owner, id.get()).await
  }

  // ── Pets ──────────────────────────────────────────────────────────────────

  async fn create_pet(&self, input: NewPet) -> Result<Pet> {
    let today = self.today();
    input.validate(today)?;
    let pet = self
      .write(move |tx| queries::insert_pet(tx, &input, today))
      .await?;
    debug!(pet_id = %pet.pet_id, owner_id = %pet.owner_id, "pet created");
    Ok(pet)
  }

  async fn get_pet(&self, id: PetId) -> Result<Option<Pet>> {
    self.read(move |conn| queries::select_pet(conn, id)).await
  }

  async fn list_pets(&self, owner: Option<OwnerId>) -> Result<Vec<Pet>> {
    self.read(move |conn| queries::list_pets(conn, owner)).await
  }

  async fn update_pet(&self, id: PetId, input: NewPet) -> Result<Pet> {
    input.validate(self.today())?;
    self
      .write(move |tx| queries::update_pet(tx, id, &input))
      .await?
      .ok_or_else(|| missing(Entity::Pet, id))
  }

  async fn delete_pet(&self, id: PetId) -> Result<()> {
    self.delete(Entity::Pet, id.get()).await
  }

  // ── Visits ────────────────────────────────────────────────────────────────

  async fn create_visit(&self, input: NewVisit) -> Result<Visit> {
    input.validate(self.today())?;
    let visit_date = input.visit_date.unwrap_or_else(|| self.clock.now());
    let visit = self
      .write(move |tx| queries::insert_visit(tx, &input, visit_date))
      .await?;
    debug!(
      visit_id = %visit.visit_id,
      pet_id = %visit.pet_id,
      total_visits_count = visit.total_visits_count,
      "visit created"
    );
    Ok(visit)
  }

  async fn get_visit(&self, id: VisitId) -> Result<Option<Visit>> {
    self.read(move |conn| queries::select_visit(conn, id)).await
  }

  async fn list_visits(&self, pet: Option<PetId>) -> Result<Vec<Visit>> {
    self.read(move |conn| queries::list_visits(conn, pet)).await
  }

  async fn update_visit(&self, id: VisitId, input: NewVisit) -> Result<Visit> {
    input.validate(self.today())?;
    self
      .write(move |tx| queries::update_visit(tx, id, &input))
      .await?
      .ok_or_else(|| missing(Entity::Visit, id))
  }

  async fn delete_visit(&self, id: VisitId) -> Result<()> {
    self.delete(Entity::Visit, id.get()).await
  }

  // ── Vaccinations ──────────────────────────────────────────────────────────

  async fn create_vaccination(
    &self,
    input: NewVaccination,
  ) -> Result<Vaccination> {
    let today = self.today();
    input.validate(today)?;
    let dates = rules::initial_vaccination_dates(&input, today);
    let vaccination = self
      .write(move |tx| queries::insert_vaccination(tx, &input, dates))
      .await?;
    debug!(
      vaccination_id = %vaccination.vaccination_id,
      next_vaccination_date = %vaccination.next_vaccination_date,
      "vaccination created"
    );
    Ok(vaccination)
  }

  async fn get_vaccination(
    &self,
    id: VaccinationId,
  ) -> Result<Option<Vaccination>> {
    self.read(move |conn| queries::select_vaccination(conn, id)).await
  }

  async fn list_vaccinations(
    &self,
    pet: Option<PetId>,
  ) -> Result<Vec<Vaccination>> {
    self
      .read(move |conn| queries::list_vaccinations(conn, pet))
      .await
  }

  async fn update_vaccination(
    &self,
    id: VaccinationId,
    input: NewVaccination,
  ) -> Result<Vaccination> {
    input.validate(self.today())?;
    self
      .write(move |tx| {
        let Some(current) = queries::select_vaccination(tx, id)? else {
          return Ok(None);
        };
        let dates = rules::apply_vaccination_update(&current, &input);
        queries::update_vaccination(tx, id, &input, dates)
      })
      .await?
      .ok_or_else(|| missing(Entity::Vaccination, id))
  }

  async fn delete_vaccination(&self, id: VaccinationId) -> Result<()> {
    self.delete(Entity::Vaccination, id.get()).await
  }

  async fn reschedule_vaccination(
    &self,
    id: VaccinationId,
    vaccination_date: NaiveDate,
  ) -> Result<Vaccination> {
    let vaccination = self
      .write(move |tx| {
        let Some(current) = queries::select_vaccination(tx, id)? else {
          return Ok(None);
        };
        let update = NewVaccination {
          pet_id:                current.pet_id,
          vet_id:                current.vet_id,
          clinic_id:             current.clinic_id,
          vaccine_name:          current.vaccine_name.clone(),
          vaccination_date:      Some(vaccination_date),
          next_vaccination_date: None,
          batch_number:          current.batch_number.clone(),
        };
        let dates = rules::apply_vaccination_update(&current, &update);
        queries::update_vaccination(tx, id, &update, dates)
      })
      .await?
      .ok_or_else(|| missing(Entity::Vaccination, id))?;
    debug!(
      vaccination_id = %id,
      next_vaccination_date = %vaccination.next_vaccination_date,
      "vaccination rescheduled"
    );
    Ok(vaccination)
  }

  // ── Operations ────────────────────────────────────────────────────────────

  async fn register_pet(&self, input: RegisterPet) -> Result<PetRegistration> {
    let today = self.today();
    input.validate(today)?;

    let registration = self
      .write(move |tx| {
        let contact = NewOwner::contact(
          input.owner_first_name,
          input.owner_last_name,
          input.owner_phone,
        );
        let (owner, owner_created) =
          queries::find_or_insert_owner(tx, &contact, today)?;
        let pet = NewPet {
          owner_id:          owner.owner_id,
          name:              input.name,
          species:           input.species,
          breed:             input.breed,
          birth_date:        input.birth_date,
          gender:            input.gender,
          chip_number:       input.chip_number,
          registration_date: None,
        };
        let pet = queries::insert_pet(tx, &pet, today)?;
        Ok(PetRegistration { owner, pet, owner_created })
      })
      .await?;

    info!(
      pet_id = %registration.pet.pet_id,
      owner_id = %registration.owner.owner_id,
      owner_created = registration.owner_created,
      "{registration}"
    );
    Ok(registration)
  }

  async fn schedule_visit(&self, input: ScheduleVisit) -> Result<Visit> {
    input.validate(self.today())?;
    let ScheduleVisit { pet_id, vet_id, clinic_id, visit_date, reason } = input;

    let booking = self
      .write(move |tx| {
        let conflict = queries::find_booking_conflict(tx, vet_id, visit_date)?;
        if let Some(conflict) = conflict {
          return Ok(Booking::Busy(conflict));
        }
        let visit = NewVisit {
          pet_id,
          vet_id:     Some(vet_id),
          clinic_id:  Some(clinic_id),
          visit_date: Some(visit_date),
          diagnosis:  reason,
          treatment:  None,
          cost:       None,
          status:     VisitStatus::Scheduled,
        };
        queries::insert_visit(tx, &visit, visit_date).map(Booking::Booked)
      })
      .await?;

    match booking {
      Booking::Booked(visit) => {
        info!(
          visit_id = %visit.visit_id,
          vet_id = %vet_id,
          "{}",
          report::visit_scheduled(&visit)
        );
        Ok(visit)
      }
      Booking::Busy(conflicting) => {
        debug!(
          vet_id = %vet_id,
          conflicting = %conflicting,
          "booking rejected"
        );
        Err(
          vetreg_core::Error::VeterinarianBusy {
            vet: vet_id,
            at: visit_date,
            conflicting,
          }
          .into(),
        )
      }
    }
  }

  async fn clinic_revenue(
    &self,
    clinic: ClinicId,
    from: NaiveDate,
    to: NaiveDate,
  ) -> Result<RevenueSummary> {
    rules::date_range(from, to)?;
    let (hundredths, visit_count) = self
      .read(move |conn| queries::completed_revenue(conn, clinic, from, to))
      .await?;
    let summary = RevenueSummary {
      clinic_id: clinic,
      from,
      to,
      total_revenue: decode_money(hundredths),
      visit_count,
    };
    info!("{summary}");
    Ok(summary)
  }

  async fn vaccination_reminders(
    &self,
    days_ahead: u32,
  ) -> Result<Vec<VaccinationReminder>> {
    let from = self.today();
    let to = from
      .checked_add_days(Days::new(u64::from(days_ahead)))
      .unwrap_or(NaiveDate::MAX);
    let reminders = self
      .read(move |conn| queries::vaccinations_due(conn, from, to))
      .await?;

    info!(
      count = reminders.len(),
      "vaccination reminders for the next {days_ahead} days"
    );
    for reminder in &reminders {
      info!("{reminder}");
    }
    Ok(reminders)
  }

  async fn transfer_pet(&self, input: TransferPet) -> Result<PetTransfer> {
    let today = self.today();
    input.validate(today)?;
    let pet_id = input.pet_id;

    let transfer = self
      .write(move |tx| {
        let Some(pet) = queries::select_pet(tx, input.pet_id)? else {
          return Ok(None);
        };
        let previous_owner_name = queries::select_owner(tx, pet.owner_id)?
          .map(|o| o.full_name())
          .unwrap_or_default();

        let contact = NewOwner::contact(
          input.new_owner_first_name,
          input.new_owner_last_name,
          input.new_owner_phone,
        );
        let (new_owner, owner_created) =
          queries::find_or_insert_owner(tx, &contact, today)?;
        let pet = queries::set_pet_owner(tx, pet.pet_id, new_owner.owner_id)?
          .ok_or(rusqlite::Error::QueryReturnedNoRows)?;

        Ok(Some(PetTransfer {
          pet,
          previous_owner_name,
          new_owner,
          owner_created,
        }))
      })
      .await?
      .ok_or_else(|| missing(Entity::Pet, pet_id))?;

    info!(
      pet_id = %transfer.pet.pet_id,
      owner_id = %transfer.new_owner.owner_id,
      owner_created = transfer.owner_created,
      "{transfer}"
    );
    Ok(transfer)
  }

  async fn add_vaccination(
    &self,
    input: AddVaccination,
  ) -> Result<Vaccination> {
    let today = self.today();
    input.validate(today)?;
    let input = NewVaccination {
      pet_id:                input.pet_id,
      vet_id:                Some(input.vet_id),
      clinic_id:             Some(input.clinic_id),
      vaccine_name:          input.vaccine_name,
      vaccination_date:      Some(today),
      next_vaccination_date: None,
      batch_number:          input.batch_number,
    };
    let dates = rules::initial_vaccination_dates(&input, today);
    let vaccination = self
      .write(move |tx| queries::insert_vaccination(tx, &input, dates))
      .await?;

    info!(
      vaccination_id = %vaccination.vaccination_id,
      next_vaccination_date = %vaccination.next_vaccination_date,
      "{}",
      report::vaccination_added(&vaccination)
    );
    Ok(vaccination)
  }
}
