//! Business rules that keep derived fields consistent.
//!
//! Everything here is pure: backends call these functions inside the same
//! write that persists the result, so the derivation is visible at the call
//! site and testable without a database.

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;

use crate::{
  Error, Result,
  model::{
    NewClinic, NewOwner, NewPet, NewVaccination, NewVeterinarian, NewVisit,
    Vaccination,
  },
  report::{AddVaccination, RegisterPet, ScheduleVisit, TransferPet},
};

/// Half-width of the interval around a booking in which the same
/// veterinarian cannot take another visit.
pub const BOOKING_WINDOW_MINUTES: i64 = 30;

/// Exclusive upper bound for money columns: ten digits, two of them
/// fractional.
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

// ─── Scheduling ──────────────────────────────────────────────────────────────

/// Inclusive `[at - window, at + window]` interval checked for double
/// bookings.
pub fn booking_window(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
  let half = TimeDelta::minutes(BOOKING_WINDOW_MINUTES);
  (at - half, at + half)
}

// ─── Vaccination dates ───────────────────────────────────────────────────────

/// One calendar year after `vaccinated_on`. 29 February maps to
/// 28 February.
pub fn next_due_date(vaccinated_on: NaiveDate) -> NaiveDate {
  vaccinated_on
    .checked_add_months(Months::new(12))
    .unwrap_or(NaiveDate::MAX)
}

/// Resolved pair of dates written to a vaccination row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaccinationDates {
  pub vaccination_date:      NaiveDate,
  pub next_vaccination_date: NaiveDate,
}

/// Dates for a freshly inserted vaccination: the date defaults to `today`,
/// a missing due date is derived from it.
pub fn initial_vaccination_dates(
  input: &NewVaccination,
  today: NaiveDate,
) -> VaccinationDates {
  let vaccination_date = input.vaccination_date.unwrap_or(today);
  VaccinationDates {
    vaccination_date,
    next_vaccination_date: input
      .next_vaccination_date
      .unwrap_or_else(|| next_due_date(vaccination_date)),
  }
}

/// Dates for an update of `current`.
///
/// When the vaccination date changes, the due date is recomputed from it and
/// any supplied due date is discarded. Otherwise the supplied due date wins,
/// falling back to the stored one.
pub fn apply_vaccination_update(
  current: &Vaccination,
  update: &NewVaccination,
) -> VaccinationDates {
  let vaccination_date =
    update.vaccination_date.unwrap_or(current.vaccination_date);

  let next_vaccination_date = if vaccination_date != current.vaccination_date {
    next_due_date(vaccination_date)
  } else {
    update
      .next_vaccination_date
      .unwrap_or(current.next_vaccination_date)
  };

  VaccinationDates { vaccination_date, next_vaccination_date }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Input checks that need the current date or span several fields. Storage
/// constraints (uniqueness, foreign keys) are left to the backend.
pub trait Validate {
  fn validate(&self, today: NaiveDate) -> Result<()>;
}

fn not_blank(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(field, "must not be empty"));
  }
  Ok(())
}

fn not_in_future(
  field: &'static str,
  date: NaiveDate,
  today: NaiveDate,
) -> Result<()> {
  if date > today {
    return Err(Error::invalid(field, format!("{date} is after {today}")));
  }
  Ok(())
}

fn money(field: &'static str, amount: Decimal) -> Result<()> {
  if amount.normalize().scale() > 2 {
    return Err(Error::invalid(field, "at most two decimal places"));
  }
  if amount.abs() >= MAX_AMOUNT {
    return Err(Error::invalid(field, "too large"));
  }
  Ok(())
}

impl Validate for NewClinic {
  fn validate(&self, today: NaiveDate) -> Result<()> {
    not_blank("name", &self.name)?;
    not_blank("address", &self.address)?;
    not_blank("phone", &self.phone)?;
    not_blank("working_hours", &self.working_hours)?;
    not_in_future("opening_date", self.opening_date, today)
  }
}

impl Validate for NewVeterinarian {
  fn validate(&self, today: NaiveDate) -> Result<()> {
    not_blank("first_name", &self.first_name)?;
    not_blank("last_name", &self.last_name)?;
    not_blank("specialization", &self.specialization)?;
    not_blank("license_number", &self.license_number)?;
    not_in_future("hire_date", self.hire_date, today)?;
    money("salary", self.salary)?;
    if self.salary <= Decimal::ZERO {
      return Err(Error::invalid("salary", "must be positive"));
    }
    Ok(())
  }
}

impl Validate for NewOwner {
  fn validate(&self, today: NaiveDate) -> Result<()> {
    not_blank("first_name", &self.first_name)?;
    not_blank("last_name", &self.last_name)?;
    not_blank("phone", &self.phone)?;
    if let Some(date) = self.registration_date {
      not_in_future("registration_date", date, today)?;
    }
    Ok(())
  }
}

impl Validate for NewPet {
  fn validate(&self, today: NaiveDate) -> Result<()> {
    not_blank("name", &self.name)?;
    not_blank("species", &self.species)?;
    if let Some(date) = self.birth_date {
      not_in_future("birth_date", date, today)?;
    }
    if let Some(date) = self.registration_date {
      not_in_future("registration_date", date, today)?;
    }
    Ok(())
  }
}

impl Validate for NewVisit {
  fn validate(&self, _today: NaiveDate) -> Result<()> {
    if let Some(cost) = self.cost {
      money("cost", cost)?;
      if cost < Decimal::ZERO {
        return Err(Error::invalid("cost", "must not be negative"));
      }
    }
    Ok(())
  }
}

impl Validate for NewVaccination {
  fn validate(&self, _today: NaiveDate) -> Result<()> {
    not_blank("vaccine_name", &self.vaccine_name)
  }
}

impl Validate for RegisterPet {
  fn validate(&self, today: NaiveDate) -> Result<()> {
    not_blank("owner_first_name", &self.owner_first_name)?;
    not_blank("owner_last_name", &self.owner_last_name)?;
    not_blank("owner_phone", &self.owner_phone)?;
    not_blank("name", &self.name)?;
    not_blank("species", &self.species)?;
    if let Some(date) = self.birth_date {
      not_in_future("birth_date", date, today)?;
    }
    Ok(())
  }
}

impl Validate for ScheduleVisit {
  fn validate(&self, _today: NaiveDate) -> Result<()> { Ok(()) }
}

impl Validate for TransferPet {
  fn validate(&self, _today: NaiveDate) -> Result<()> {
    not_blank("new_owner_first_name", &self.new_owner_first_name)?;
    not_blank("new_owner_last_name", &self.new_owner_last_name)?;
    not_blank("new_owner_phone", &self.new_owner_phone)
  }
}

impl Validate for AddVaccination {
  fn validate(&self, _today: NaiveDate) -> Result<()> {
    not_blank("vaccine_name", &self.vaccine_name)
  }
}

/// Checks an inclusive date range for revenue reports.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
  if from > to {
    return Err(Error::invalid("date range", format!("{from} is after {to}")));
  }
  Ok(())
}
