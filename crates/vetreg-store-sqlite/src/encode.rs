//! Encoding and decoding helpers between Rust domain types and the plain-text
//! and integer representations stored in SQLite columns.
//!
//! Decoding happens inside the row-mapping closures, so failures surface as
//! [`rusqlite::Error::FromSqlConversionFailure`] pointing at the column.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Row, types::Type};
use rust_decimal::Decimal;
use vetreg_core::{
  id::{ClinicId, OwnerId, PetId, VaccinationId, VetId, VisitId},
  model::{Clinic, Owner, Pet, Vaccination, Veterinarian, Visit},
  report::VaccinationReminder,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Scalars ─────────────────────────────────────────────────────────────────

/// Last date whose text form sorts in calendar order. Later years are
/// written with a leading `+`.
const LAST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
  Some(date) => date,
  None => NaiveDate::MAX,
};

/// Narrows the inclusive range `from..=to` to dates that compare correctly
/// as text. `None` when nothing in the range can be stored.
pub fn text_ordered_range(
  from: NaiveDate,
  to: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
  (from <= LAST_DATE).then(|| (from, to.min(LAST_DATE)))
}

pub fn encode_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

pub fn encode_timestamp(at: NaiveDateTime) -> String {
  at.format(TIMESTAMP_FORMAT).to_string()
}

/// Hundredths. Amounts have been validated to fit `DECIMAL(10, 2)`.
pub fn encode_money(amount: Decimal) -> i64 {
  let mut amount = amount.round_dp(2);
  amount.rescale(2);
  i64::try_from(amount.mantissa()).unwrap_or(i64::MAX)
}

pub fn decode_money(hundredths: i64) -> Decimal { Decimal::new(hundredths, 2) }

fn conversion_error(
  idx: usize,
  err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
  let raw: String = row.get(idx)?;
  NaiveDate::parse_from_str(&raw, DATE_FORMAT)
    .map_err(|e| conversion_error(idx, e))
}

fn opt_date_at(
  row: &Row<'_>,
  idx: usize,
) -> rusqlite::Result<Option<NaiveDate>> {
  let raw: Option<String> = row.get(idx)?;
  raw
    .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT))
    .transpose()
    .map_err(|e| conversion_error(idx, e))
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
  let raw: String = row.get(idx)?;
  NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
    .map_err(|e| conversion_error(idx, e))
}

fn parsed_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let raw: String = row.get(idx)?;
  raw.parse().map_err(|e| conversion_error(idx, e))
}

// ─── Rows ────────────────────────────────────────────────────────────────────
//
// Each `*_COLUMNS` list matches the index order read by the mapper below it.

pub const CLINIC_COLUMNS: &str = "clinic_id, name, address, phone, email, \
                                  website, opening_date, working_hours";

pub fn clinic_from_row(row: &Row<'_>) -> rusqlite::Result<Clinic> {
  Ok(Clinic {
    clinic_id:     ClinicId(row.get(0)?),
    name:          row.get(1)?,
    address:       row.get(2)?,
    phone:         row.get(3)?,
    email:         row.get(4)?,
    website:       row.get(5)?,
    opening_date:  date_at(row, 6)?,
    working_hours: row.get(7)?,
  })
}

pub const VETERINARIAN_COLUMNS: &str = "vet_id, clinic_id, first_name, \
                                        last_name, specialization, \
                                        license_number, hire_date, salary";

pub fn veterinarian_from_row(row: &Row<'_>) -> rusqlite::Result<Veterinarian> {
  Ok(Veterinarian {
    vet_id:         VetId(row.get(0)?),
    clinic_id:      ClinicId(row.get(1)?),
    first_name:     row.get(2)?,
    last_name:      row.get(3)?,
    specialization: row.get(4)?,
    license_number: row.get(5)?,
    hire_date:      date_at(row, 6)?,
    salary:         decode_money(row.get(7)?),
  })
}

pub const OWNER_COLUMNS: &str = "owner_id, first_name, last_name, phone, \
                                 email, address, registration_date";

pub fn owner_from_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
  Ok(Owner {
    owner_id:          OwnerId(row.get(0)?),
    first_name:        row.get(1)?,
    last_name:         row.get(2)?,
    phone:             row.get(3)?,
    email:             row.get(4)?,
    address:           row.get(5)?,
    registration_date: date_at(row, 6)?,
  })
}

pub const PET_COLUMNS: &str = "pet_id, owner_id, name, species, breed, \
                               birth_date, gender, chip_number, \
                               registration_date";

pub fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<Pet> {
  Ok(Pet {
    pet_id:            PetId(row.get(0)?),
    owner_id:          OwnerId(row.get(1)?),
    name:              row.get(2)?,
    species:           row.get(3)?,
    breed:             row.get(4)?,
    birth_date:        opt_date_at(row, 5)?,
    gender:            parsed_at(row, 6)?,
    chip_number:       row.get(7)?,
    registration_date: date_at(row, 8)?,
  })
}

pub const VISIT_COLUMNS: &str = "visit_id, pet_id, vet_id, clinic_id, \
                                 visit_date, diagnosis, treatment, cost, \
                                 status, total_visits_count";

pub fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<Visit> {
  Ok(Visit {
    visit_id:           VisitId(row.get(0)?),
    pet_id:             PetId(row.get(1)?),
    vet_id:             row.get::<_, Option<i64>>(2)?.map(VetId),
    clinic_id:          row.get::<_, Option<i64>>(3)?.map(ClinicId),
    visit_date:         timestamp_at(row, 4)?,
    diagnosis:          row.get(5)?,
    treatment:          row.get(6)?,
    cost:               row.get::<_, Option<i64>>(7)?.map(decode_money),
    status:             parsed_at(row, 8)?,
    total_visits_count: row.get(9)?,
  })
}

pub const VACCINATION_COLUMNS: &str = "vaccination_id, pet_id, vet_id, \
                                       clinic_id, vaccine_name, \
                                       vaccination_date, \
                                       next_vaccination_date, batch_number";

pub fn vaccination_from_row(row: &Row<'_>) -> rusqlite::Result<Vaccination> {
  Ok(Vaccination {
    vaccination_id:        VaccinationId(row.get(0)?),
    pet_id:                PetId(row.get(1)?),
    vet_id:                row.get::<_, Option<i64>>(2)?.map(VetId),
    clinic_id:             row.get::<_, Option<i64>>(3)?.map(ClinicId),
    vaccine_name:          row.get(4)?,
    vaccination_date:      date_at(row, 5)?,
    next_vaccination_date: date_at(row, 6)?,
    batch_number:          row.get(7)?,
  })
}

/// Reads the projection of the reminder query in
/// [`crate::queries::vaccinations_due`].
pub fn reminder_from_row(
  row: &Row<'_>,
) -> rusqlite::Result<VaccinationReminder> {
  Ok(VaccinationReminder {
    vaccination_id:        VaccinationId(row.get(0)?),
    pet_id:                PetId(row.get(1)?),
    pet_name:              row.get(2)?,
    owner_first_name:      row.get(3)?,
    owner_last_name:       row.get(4)?,
    owner_phone:           row.get(5)?,
    owner_email:           row.get(6)?,
    vaccine_name:          row.get(7)?,
    next_vaccination_date: date_at(row, 8)?,
  })
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn money_is_stored_in_hundredths() {
    assert_eq!(encode_money(dec!(2500)), 250_000);
    assert_eq!(encode_money(dec!(18.5)), 1_850);
    assert_eq!(encode_money(dec!(0.07)), 7);
    assert_eq!(decode_money(250_000), dec!(2500.00));
  }

  #[test]
  fn timestamps_sort_as_text() {
    let early = NaiveDate::from_ymd_opt(2025, 1, 9)
      .unwrap()
      .and_hms_opt(23, 59, 59)
      .unwrap();
    let late = NaiveDate::from_ymd_opt(2025, 1, 10)
      .unwrap()
      .and_hms_opt(0, 0, 0)
      .unwrap();
    assert_eq!(encode_timestamp(late), "2025-01-10 00:00:00");
    assert!(encode_timestamp(early) < encode_timestamp(late));
  }
}
