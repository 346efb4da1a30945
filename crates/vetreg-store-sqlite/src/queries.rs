//! Synchronous SQL statements, run on the connection thread.
//!
//! Every function takes a plain [`rusqlite::Connection`]; a
//! [`rusqlite::Transaction`] derefs to one, so the store composes these into
//! single-transaction operations. All values are bound as parameters; the
//! only interpolated identifiers come from [`Entity`] and the fixed column
//! lists in [`crate::encode`].

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension as _, params};
use vetreg_core::{
  id::{ClinicId, OwnerId, PetId, VaccinationId, VetId, VisitId},
  model::{
    Clinic, Entity, NewClinic, NewOwner, NewPet, NewVaccination,
    NewVeterinarian, NewVisit, Owner, Pet, Vaccination, Veterinarian, Visit,
    VisitStatus,
  },
  report::VaccinationReminder,
  rules::{VaccinationDates, booking_window},
};

use crate::encode::{
  CLINIC_COLUMNS, OWNER_COLUMNS, PET_COLUMNS, VACCINATION_COLUMNS,
  VETERINARIAN_COLUMNS, VISIT_COLUMNS, clinic_from_row, encode_date,
  encode_money, encode_timestamp, owner_from_row, pet_from_row,
  reminder_from_row, text_ordered_range, vaccination_from_row,
  veterinarian_from_row, visit_from_row,
};

fn primary_key(entity: Entity) -> &'static str {
  match entity {
    Entity::Clinic => "clinic_id",
    Entity::Veterinarian => "vet_id",
    Entity::Owner => "owner_id",
    Entity::Pet => "pet_id",
    Entity::Visit => "visit_id",
    Entity::Vaccination => "vaccination_id",
  }
}

fn status_str(status: VisitStatus) -> &'static str { status.into() }

/// Delete one row by primary key. Returns `false` if no such row exists.
/// Dependent rows follow the foreign-key deletion policies.
pub fn delete_row(
  conn: &Connection,
  entity: Entity,
  id: i64,
) -> rusqlite::Result<bool> {
  let sql = format!(
    "DELETE FROM {} WHERE {} = ?1",
    entity.table(),
    primary_key(entity)
  );
  Ok(conn.execute(&sql, params![id])? > 0)
}

// ─── Clinics ─────────────────────────────────────────────────────────────────

pub fn insert_clinic(
  conn: &Connection,
  input: &NewClinic,
) -> rusqlite::Result<Clinic> {
  let sql = format!(
    "INSERT INTO clinics (
       name, address, phone, email, website, opening_date, working_hours
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     RETURNING {CLINIC_COLUMNS}"
  );
  conn.query_row(
    &sql,
    params![
      input.name,
      input.address,
      input.phone,
      input.email,
      input.website,
      encode_date(input.opening_date),
      input.working_hours,
    ],
    clinic_from_row,
  )
}

pub fn select_clinic(
  conn: &Connection,
  id: ClinicId,
) -> rusqlite::Result<Option<Clinic>> {
  let sql =
    format!("SELECT {CLINIC_COLUMNS} FROM clinics WHERE clinic_id = ?1");
  conn.query_row(&sql, params![id.get()], clinic_from_row).optional()
}

pub fn list_clinics(conn: &Connection) -> rusqlite::Result<Vec<Clinic>> {
  let sql = format!("SELECT {CLINIC_COLUMNS} FROM clinics ORDER BY clinic_id");
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map([], clinic_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn update_clinic(
  conn: &Connection,
  id: ClinicId,
  input: &NewClinic,
) -> rusqlite::Result<Option<Clinic>> {
  let sql = format!(
    "UPDATE clinics SET
       name = ?2, address = ?3, phone = ?4, email = ?5, website = ?6,
       opening_date = ?7, working_hours = ?8
     WHERE clinic_id = ?1
     RETURNING {CLINIC_COLUMNS}"
  );
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.name,
        input.address,
        input.phone,
        input.email,
        input.website,
        encode_date(input.opening_date),
        input.working_hours,
      ],
      clinic_from_row,
    )
    .optional()
}

// ─── Veterinarians ───────────────────────────────────────────────────────────

pub fn insert_veterinarian(
  conn: &Connection,
  input: &NewVeterinarian,
) -> rusqlite::Result<Veterinarian> {
  let sql = format!(
    "INSERT INTO veterinarians (
       clinic_id, first_name, last_name, specialization, license_number,
       hire_date, salary
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     RETURNING {VETERINARIAN_COLUMNS}"
  );
  conn.query_row(
    &sql,
    params![
      input.clinic_id.get(),
      input.first_name,
      input.last_name,
      input.specialization,
      input.license_number,
      encode_date(input.hire_date),
      encode_money(input.salary),
    ],
    veterinarian_from_row,
  )
}

pub fn select_veterinarian(
  conn: &Connection,
  id: VetId,
) -> rusqlite::Result<Option<Veterinarian>> {
  let sql = format!(
    "SELECT {VETERINARIAN_COLUMNS} FROM veterinarians WHERE vet_id = ?1"
  );
  conn
    .query_row(&sql, params![id.get()], veterinarian_from_row)
    .optional()
}

pub fn list_veterinarians(
  conn: &Connection,
  clinic: Option<ClinicId>,
) -> rusqlite::Result<Vec<Veterinarian>> {
  let sql = format!(
    "SELECT {VETERINARIAN_COLUMNS} FROM veterinarians
     WHERE ?1 IS NULL OR clinic_id = ?1
     ORDER BY vet_id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params![clinic.map(ClinicId::get)], veterinarian_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn update_veterinarian(
  conn: &Connection,
  id: VetId,
  input: &NewVeterinarian,
) -> rusqlite::Result<Option<Veterinarian>> {
  let sql = format!(
    "UPDATE veterinarians SET
       clinic_id = ?2, first_name = ?3, last_name = ?4, specialization = ?5,
       license_number = ?6, hire_date = ?7, salary = ?8
     WHERE vet_id = ?1
     RETURNING {VETERINARIAN_COLUMNS}"
  );
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.clinic_id.get(),
        input.first_name,
        input.last_name,
        input.specialization,
        input.license_number,
        encode_date(input.hire_date),
        encode_money(input.salary),
      ],
      veterinarian_from_row,
    )
    .optional()
}

// ─── Owners ──────────────────────────────────────────────────────────────────

/// `today` fills a missing registration date.
pub fn insert_owner(
  conn: &Connection,
  input: &NewOwner,
  today: NaiveDate,
) -> rusqlite::Result<Owner> {
  let sql = format!(
    "INSERT INTO owners (
       first_name, last_name, phone, email, address, registration_date
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     RETURNING {OWNER_COLUMNS}"
  );
  conn.query_row(
    &sql,
    params![
      input.first_name,
      input.last_name,
      input.phone,
      input.email,
      input.address,
      encode_date(input.registration_date.unwrap_or(today)),
    ],
    owner_from_row,
  )
}

pub fn select_owner(
  conn: &Connection,
  id: OwnerId,
) -> rusqlite::Result<Option<Owner>> {
  let sql = format!("SELECT {OWNER_COLUMNS} FROM owners WHERE owner_id = ?1");
  conn.query_row(&sql, params![id.get()], owner_from_row).optional()
}

pub fn select_owner_by_phone(
  conn: &Connection,
  phone: &str,
) -> rusqlite::Result<Option<Owner>> {
  let sql = format!("SELECT {OWNER_COLUMNS} FROM owners WHERE phone = ?1");
  conn.query_row(&sql, params![phone], owner_from_row).optional()
}

/// Look the owner up by phone, inserting `contact` if nobody has it.
/// The flag is `true` when a new row was created.
pub fn find_or_insert_owner(
  conn: &Connection,
  contact: &NewOwner,
  today: NaiveDate,
) -> rusqlite::Result<(Owner, bool)> {
  match select_owner_by_phone(conn, &contact.phone)? {
    Some(owner) => Ok((owner, false)),
    None => Ok((insert_owner(conn, contact, today)?, true)),
  }
}

pub fn list_owners(conn: &Connection) -> rusqlite::Result<Vec<Owner>> {
  let sql = format!("SELECT {OWNER_COLUMNS} FROM owners ORDER BY owner_id");
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map([], owner_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// A missing registration date keeps the stored one.
pub fn update_owner(
  conn: &Connection,
  id: OwnerId,
  input: &NewOwner,
) -> rusqlite::Result<Option<Owner>> {
  let sql = format!(
    "UPDATE owners SET
       first_name = ?2, last_name = ?3, phone = ?4, email = ?5, address = ?6,
       registration_date = COALESCE(?7, registration_date)
     WHERE owner_id = ?1
     RETURNING {OWNER_COLUMNS}"
  );
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.first_name,
        input.last_name,
        input.phone,
        input.email,
        input.address,
        input.registration_date.map(encode_date),
      ],
      owner_from_row,
    )
    .optional()
}

// ─── Pets ────────────────────────────────────────────────────────────────────

/// `today` fills a missing registration date.
pub fn insert_pet(
  conn: &Connection,
  input: &NewPet,
  today: NaiveDate,
) -> rusqlite::Result<Pet> {
  let sql = format!(
    "INSERT INTO pets (
       owner_id, name, species, breed, birth_date, gender, chip_number,
       registration_date
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     RETURNING {PET_COLUMNS}"
  );
  let gender: &'static str = input.gender.into();
  conn.query_row(
    &sql,
    params![
      input.owner_id.get(),
      input.name,
      input.species,
      input.breed,
      input.birth_date.map(encode_date),
      gender,
      input.chip_number,
      encode_date(input.registration_date.unwrap_or(today)),
    ],
    pet_from_row,
  )
}

pub fn select_pet(
  conn: &Connection,
  id: PetId,
) -> rusqlite::Result<Option<Pet>> {
  let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE pet_id = ?1");
  conn.query_row(&sql, params![id.get()], pet_from_row).optional()
}

pub fn list_pets(
  conn: &Connection,
  owner: Option<OwnerId>,
) -> rusqlite::Result<Vec<Pet>> {
  let sql = format!(
    "SELECT {PET_COLUMNS} FROM pets
     WHERE ?1 IS NULL OR owner_id = ?1
     ORDER BY pet_id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params![owner.map(OwnerId::get)], pet_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// A missing registration date keeps the stored one.
pub fn update_pet(
  conn: &Connection,
  id: PetId,
  input: &NewPet,
) -> rusqlite::Result<Option<Pet>> {
  let sql = format!(
    "UPDATE pets SET
       owner_id = ?2, name = ?3, species = ?4, breed = ?5, birth_date = ?6,
       gender = ?7, chip_number = ?8,
       registration_date = COALESCE(?9, registration_date)
     WHERE pet_id = ?1
     RETURNING {PET_COLUMNS}"
  );
  let gender: &'static str = input.gender.into();
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.owner_id.get(),
        input.name,
        input.species,
        input.breed,
        input.birth_date.map(encode_date),
        gender,
        input.chip_number,
        input.registration_date.map(encode_date),
      ],
      pet_from_row,
    )
    .optional()
}

pub fn set_pet_owner(
  conn: &Connection,
  pet: PetId,
  owner: OwnerId,
) -> rusqlite::Result<Option<Pet>> {
  let sql = format!(
    "UPDATE pets SET owner_id = ?2 WHERE pet_id = ?1 RETURNING {PET_COLUMNS}"
  );
  conn
    .query_row(&sql, params![pet.get(), owner.get()], pet_from_row)
    .optional()
}

// ─── Visits ──────────────────────────────────────────────────────────────────

/// Insert a visit at `visit_date`, then stamp it with the pet's visit count
/// including itself. Older rows keep their own counts.
pub fn insert_visit(
  conn: &Connection,
  input: &NewVisit,
  visit_date: NaiveDateTime,
) -> rusqlite::Result<Visit> {
  conn.execute(
    "INSERT INTO visits (
       pet_id, vet_id, clinic_id, visit_date, diagnosis, treatment, cost,
       status
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      input.pet_id.get(),
      input.vet_id.map(VetId::get),
      input.clinic_id.map(ClinicId::get),
      encode_timestamp(visit_date),
      input.diagnosis,
      input.treatment,
      input.cost.map(encode_money),
      status_str(input.status),
    ],
  )?;
  let visit_id = conn.last_insert_rowid();

  let sql = format!(
    "UPDATE visits
     SET total_visits_count = (
       SELECT COUNT(*) FROM visits WHERE pet_id = ?1
     )
     WHERE visit_id = ?2
     RETURNING {VISIT_COLUMNS}"
  );
  conn.query_row(&sql, params![input.pet_id.get(), visit_id], visit_from_row)
}

pub fn select_visit(
  conn: &Connection,
  id: VisitId,
) -> rusqlite::Result<Option<Visit>> {
  let sql = format!("SELECT {VISIT_COLUMNS} FROM visits WHERE visit_id = ?1");
  conn.query_row(&sql, params![id.get()], visit_from_row).optional()
}

pub fn list_visits(
  conn: &Connection,
  pet: Option<PetId>,
) -> rusqlite::Result<Vec<Visit>> {
  let sql = format!(
    "SELECT {VISIT_COLUMNS} FROM visits
     WHERE ?1 IS NULL OR pet_id = ?1
     ORDER BY visit_date, visit_id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params![pet.map(PetId::get)], visit_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Replaces every caller-owned column; a missing date keeps the stored one.
pub fn update_visit(
  conn: &Connection,
  id: VisitId,
  input: &NewVisit,
) -> rusqlite::Result<Option<Visit>> {
  let sql = format!(
    "UPDATE visits SET
       pet_id = ?2, vet_id = ?3, clinic_id = ?4,
       visit_date = COALESCE(?5, visit_date),
       diagnosis = ?6, treatment = ?7, cost = ?8, status = ?9
     WHERE visit_id = ?1
     RETURNING {VISIT_COLUMNS}"
  );
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.pet_id.get(),
        input.vet_id.map(VetId::get),
        input.clinic_id.map(ClinicId::get),
        input.visit_date.map(encode_timestamp),
        input.diagnosis,
        input.treatment,
        input.cost.map(encode_money),
        status_str(input.status),
      ],
      visit_from_row,
    )
    .optional()
}

/// First visit of `vet` inside the booking window around `at` that is not
/// cancelled.
pub fn find_booking_conflict(
  conn: &Connection,
  vet: VetId,
  at: NaiveDateTime,
) -> rusqlite::Result<Option<VisitId>> {
  let (start, end) = booking_window(at);
  conn
    .query_row(
      "SELECT visit_id FROM visits
       WHERE vet_id = ?1
         AND status <> ?2
         AND visit_date BETWEEN ?3 AND ?4
       ORDER BY visit_date
       LIMIT 1",
      params![
        vet.get(),
        status_str(VisitStatus::Cancelled),
        encode_timestamp(start),
        encode_timestamp(end),
      ],
      |row| row.get(0).map(VisitId),
    )
    .optional()
}

/// `(sum of cost in hundredths, visit count)` of completed visits of
/// `clinic` on days `from..=to`.
pub fn completed_revenue(
  conn: &Connection,
  clinic: ClinicId,
  from: NaiveDate,
  to: NaiveDate,
) -> rusqlite::Result<(i64, u32)> {
  let Some((from, to)) = text_ordered_range(from, to) else {
    return Ok((0, 0));
  };
  conn.query_row(
    "SELECT COALESCE(SUM(cost), 0), COUNT(*) FROM visits
     WHERE clinic_id = ?1
       AND status = ?2
       AND date(visit_date) BETWEEN ?3 AND ?4",
    params![
      clinic.get(),
      status_str(VisitStatus::Completed),
      encode_date(from),
      encode_date(to),
    ],
    |row| Ok((row.get(0)?, row.get(1)?)),
  )
}

// ─── Vaccinations ────────────────────────────────────────────────────────────

pub fn insert_vaccination(
  conn: &Connection,
  input: &NewVaccination,
  dates: VaccinationDates,
) -> rusqlite::Result<Vaccination> {
  let sql = format!(
    "INSERT INTO vaccinations (
       pet_id, vet_id, clinic_id, vaccine_name, vaccination_date,
       next_vaccination_date, batch_number
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     RETURNING {VACCINATION_COLUMNS}"
  );
  conn.query_row(
    &sql,
    params![
      input.pet_id.get(),
      input.vet_id.map(VetId::get),
      input.clinic_id.map(ClinicId::get),
      input.vaccine_name,
      encode_date(dates.vaccination_date),
      encode_date(dates.next_vaccination_date),
      input.batch_number,
    ],
    vaccination_from_row,
  )
}

pub fn select_vaccination(
  conn: &Connection,
  id: VaccinationId,
) -> rusqlite::Result<Option<Vaccination>> {
  let sql = format!(
    "SELECT {VACCINATION_COLUMNS} FROM vaccinations WHERE vaccination_id = ?1"
  );
  conn
    .query_row(&sql, params![id.get()], vaccination_from_row)
    .optional()
}

pub fn list_vaccinations(
  conn: &Connection,
  pet: Option<PetId>,
) -> rusqlite::Result<Vec<Vaccination>> {
  let sql = format!(
    "SELECT {VACCINATION_COLUMNS} FROM vaccinations
     WHERE ?1 IS NULL OR pet_id = ?1
     ORDER BY vaccination_date, vaccination_id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params![pet.map(PetId::get)], vaccination_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn update_vaccination(
  conn: &Connection,
  id: VaccinationId,
  input: &NewVaccination,
  dates: VaccinationDates,
) -> rusqlite::Result<Option<Vaccination>> {
  let sql = format!(
    "UPDATE vaccinations SET
       pet_id = ?2, vet_id = ?3, clinic_id = ?4, vaccine_name = ?5,
       vaccination_date = ?6, next_vaccination_date = ?7, batch_number = ?8
     WHERE vaccination_id = ?1
     RETURNING {VACCINATION_COLUMNS}"
  );
  conn
    .query_row(
      &sql,
      params![
        id.get(),
        input.pet_id.get(),
        input.vet_id.map(VetId::get),
        input.clinic_id.map(ClinicId::get),
        input.vaccine_name,
        encode_date(dates.vaccination_date),
        encode_date(dates.next_vaccination_date),
        input.batch_number,
      ],
      vaccination_from_row,
    )
    .optional()
}

/// Vaccinations due on days `from..=to` joined with pet and owner contact
/// details, soonest first.
pub fn vaccinations_due(
  conn: &Connection,
  from: NaiveDate,
  to: NaiveDate,
) -> rusqlite::Result<Vec<VaccinationReminder>> {
  let Some((from, to)) = text_ordered_range(from, to) else {
    return Ok(Vec::new());
  };
  let mut stmt = conn.prepare(
    "SELECT v.vaccination_id, p.pet_id, p.name,
            o.first_name, o.last_name, o.phone, o.email,
            v.vaccine_name, v.next_vaccination_date
     FROM vaccinations v
     JOIN pets   p ON p.pet_id   = v.pet_id
     JOIN owners o ON o.owner_id = p.owner_id
     WHERE v.next_vaccination_date BETWEEN ?1 AND ?2
     ORDER BY v.next_vaccination_date, v.vaccination_id",
  )?;
  let rows = stmt
    .query_map(
      params![encode_date(from), encode_date(to)],
      reminder_from_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Whether every registry table is empty; gates demo seeding, whose rows
/// carry fixed ids and phone numbers.
pub fn is_empty(conn: &Connection) -> rusqlite::Result<bool> {
  conn.query_row(
    "SELECT NOT (
       EXISTS (SELECT 1 FROM clinics)
       OR EXISTS (SELECT 1 FROM veterinarians)
       OR EXISTS (SELECT 1 FROM owners)
       OR EXISTS (SELECT 1 FROM pets)
       OR EXISTS (SELECT 1 FROM visits)
       OR EXISTS (SELECT 1 FROM vaccinations)
     )",
    [],
    |row| row.get(0),
  )
}
