//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use vetreg_core::{
  Clock, ErrorKind, RegistryError,
  id::{ClinicId, OwnerId, PetId, VetId, VisitId},
  model::{
    Gender, NewClinic, NewOwner, NewPet, NewVaccination, NewVeterinarian,
    NewVisit, VisitStatus,
  },
  registry::ClinicRegistry,
  report::{AddVaccination, RegisterPet, ScheduleVisit, TransferPet},
};

use crate::{Error, SqliteStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
  date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// "Now" for every test store.
fn now() -> NaiveDateTime { at(2026, 3, 15, 9, 0) }

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
    .with_clock(Clock::Fixed(now()))
}

fn core_error(err: Error) -> vetreg_core::Error {
  match err {
    Error::Core(e) => e,
    other => panic!("expected a core error, got {other:?}"),
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn clinic_input(name: &str, phone: &str) -> NewClinic {
  NewClinic {
    name:          name.into(),
    address:       format!("{name}, Main St 1"),
    phone:         phone.into(),
    email:         None,
    website:       None,
    opening_date:  date(2015, 6, 1),
    working_hours: "09:00-21:00".into(),
  }
}

fn vet_input(clinic_id: ClinicId, license: &str) -> NewVeterinarian {
  NewVeterinarian {
    clinic_id,
    first_name: "Elena".into(),
    last_name: "Poluyanova".into(),
    specialization: "Therapist".into(),
    license_number: license.into(),
    hire_date: date(2020, 9, 1),
    salary: dec!(75000.00),
  }
}

fn pet_input(owner_id: OwnerId, name: &str) -> NewPet {
  NewPet {
    owner_id,
    name: name.into(),
    species: "Cat".into(),
    breed: None,
    birth_date: Some(date(2020, 5, 10)),
    gender: Gender::Male,
    chip_number: None,
    registration_date: None,
  }
}

fn visit_input(pet_id: PetId, vet_id: VetId, clinic_id: ClinicId) -> NewVisit {
  NewVisit {
    pet_id,
    vet_id: Some(vet_id),
    clinic_id: Some(clinic_id),
    visit_date: None,
    diagnosis: None,
    treatment: None,
    cost: None,
    status: VisitStatus::Scheduled,
  }
}

fn vaccination_input(pet_id: PetId) -> NewVaccination {
  NewVaccination {
    pet_id,
    vet_id: None,
    clinic_id: None,
    vaccine_name: "Nobivac Tricat".into(),
    vaccination_date: None,
    next_vaccination_date: None,
    batch_number: None,
  }
}

struct Fixture {
  clinic: ClinicId,
  vet:    VetId,
  owner:  OwnerId,
  pet:    PetId,
}

/// One clinic with one veterinarian, and one owner with one pet.
async fn fixture(s: &SqliteStore) -> Fixture {
  let clinic = s
    .create_clinic(clinic_input("Veta", "+7(904)568-90-71"))
    .await
    .unwrap();
  let vet = s
    .create_veterinarian(vet_input(clinic.clinic_id, "VET-0001"))
    .await
    .unwrap();
  let owner = s
    .create_owner(NewOwner::contact("Alexander", "Volkov", "+79161234567"))
    .await
    .unwrap();
  let pet = s
    .create_pet(pet_input(owner.owner_id, "Barsik"))
    .await
    .unwrap();
  Fixture {
    clinic: clinic.clinic_id,
    vet:    vet.vet_id,
    owner:  owner.owner_id,
    pet:    pet.pet_id,
  }
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_clinic() {
  let s = store().await;
  let clinic = s
    .create_clinic(clinic_input("Veta", "+7(904)568-90-71"))
    .await
    .unwrap();

  let fetched = s.get_clinic(clinic.clinic_id).await.unwrap();
  assert_eq!(fetched, Some(clinic));
  assert_eq!(s.list_clinics().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_pet(PetId(42)).await.unwrap().is_none());
  assert!(s.get_visit(VisitId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn update_and_delete_missing_are_not_found() {
  let s = store().await;

  let err = s
    .update_clinic(ClinicId(7), clinic_input("Veta", "+7(904)568-90-71"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);

  let err = s.delete_owner(OwnerId(7)).await.unwrap_err();
  assert!(matches!(
    core_error(err),
    vetreg_core::Error::NotFound { id: 7, .. }
  ));
}

#[tokio::test]
async fn owner_and_pet_default_registration_date_to_today() {
  let s = store().await;
  let f = fixture(&s).await;

  let owner = s.get_owner(f.owner).await.unwrap().unwrap();
  let pet = s.get_pet(f.pet).await.unwrap().unwrap();
  assert_eq!(owner.registration_date, now().date());
  assert_eq!(pet.registration_date, now().date());
}

#[tokio::test]
async fn update_replaces_row() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = vet_input(f.clinic, "VET-0001");
  input.specialization = "Surgeon".into();
  input.salary = dec!(80000.50);
  let vet = s.update_veterinarian(f.vet, input).await.unwrap();

  assert_eq!(vet.specialization, "Surgeon");
  assert_eq!(vet.salary, dec!(80000.50));
  assert_eq!(s.get_veterinarian(f.vet).await.unwrap(), Some(vet));
}

#[tokio::test]
async fn lists_filter_by_parent() {
  let s = store().await;
  let f = fixture(&s).await;
  let other = s
    .create_owner(NewOwner::contact("Olga", "Lisitsyna", "+79164567890"))
    .await
    .unwrap();
  s.create_pet(pet_input(other.owner_id, "Rex")).await.unwrap();
  s.create_pet(pet_input(other.owner_id, "Laika")).await.unwrap();

  assert_eq!(s.list_pets(None).await.unwrap().len(), 3);
  let pets = s.list_pets(Some(other.owner_id)).await.unwrap();
  assert_eq!(pets.len(), 2);
  assert!(pets.iter().all(|p| p.owner_id == other.owner_id));
  assert_eq!(s.list_pets(Some(f.owner)).await.unwrap().len(), 1);
}

// ─── Constraints and validation ──────────────────────────────────────────────

#[tokio::test]
async fn duplicate_chip_number_is_a_constraint_violation() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut first = pet_input(f.owner, "Rex");
  first.chip_number = Some("643094100000004".into());
  s.create_pet(first.clone()).await.unwrap();

  first.name = "Laika".into();
  let err = s.create_pet(first).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert!(matches!(core_error(err), vetreg_core::Error::Constraint(_)));
}

#[tokio::test]
async fn pets_without_chip_do_not_collide() {
  let s = store().await;
  let f = fixture(&s).await;
  s.create_pet(pet_input(f.owner, "Murka")).await.unwrap();
  s.create_pet(pet_input(f.owner, "Sharik")).await.unwrap();
  assert_eq!(s.list_pets(Some(f.owner)).await.unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_parent_is_a_constraint_violation() {
  let s = store().await;
  let err = s
    .create_pet(pet_input(OwnerId(99), "Barsik"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn future_birth_date_is_rejected() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = pet_input(f.owner, "Rex");
  input.birth_date = Some(date(2026, 3, 16));
  let err = s.create_pet(input).await.unwrap_err();
  assert!(matches!(
    core_error(err),
    vetreg_core::Error::Validation { field: "birth_date", .. }
  ));
}

#[tokio::test]
async fn negative_cost_is_rejected() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = visit_input(f.pet, f.vet, f.clinic);
  input.cost = Some(dec!(-1));
  let err = s.create_visit(input).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Invalid);
  assert!(s.list_visits(None).await.unwrap().is_empty());
}

// ─── Visit counter ───────────────────────────────────────────────────────────

#[tokio::test]
async fn visit_counter_counts_the_pets_visits() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut counts = Vec::new();
  for day in 1..=3 {
    let mut input = visit_input(f.pet, f.vet, f.clinic);
    input.visit_date = Some(at(2026, 3, day, 10, 0));
    counts.push(s.create_visit(input).await.unwrap().total_visits_count);
  }
  assert_eq!(counts, vec![1, 2, 3]);

  // Earlier rows keep their snapshot.
  let visits = s.list_visits(Some(f.pet)).await.unwrap();
  let stored: Vec<_> = visits.iter().map(|v| v.total_visits_count).collect();
  assert_eq!(stored, vec![1, 2, 3]);
}

#[tokio::test]
async fn visit_counter_is_per_pet() {
  let s = store().await;
  let f = fixture(&s).await;
  let other = s.create_pet(pet_input(f.owner, "Murka")).await.unwrap();

  s.create_visit(visit_input(f.pet, f.vet, f.clinic))
    .await
    .unwrap();
  let visit = s
    .create_visit(visit_input(other.pet_id, f.vet, f.clinic))
    .await
    .unwrap();
  assert_eq!(visit.total_visits_count, 1);
}

#[tokio::test]
async fn visit_defaults_to_now_and_update_keeps_counter() {
  let s = store().await;
  let f = fixture(&s).await;
  s.create_visit(visit_input(f.pet, f.vet, f.clinic))
    .await
    .unwrap();
  let visit = s
    .create_visit(visit_input(f.pet, f.vet, f.clinic))
    .await
    .unwrap();
  assert_eq!(visit.visit_date, now());
  assert_eq!(visit.total_visits_count, 2);

  let mut input = visit_input(f.pet, f.vet, f.clinic);
  input.status = VisitStatus::Completed;
  input.cost = Some(dec!(2500));
  let updated = s.update_visit(visit.visit_id, input).await.unwrap();
  assert_eq!(updated.status, VisitStatus::Completed);
  assert_eq!(updated.visit_date, now());
  assert_eq!(updated.total_visits_count, 2);
}

// ─── Vaccination dates ───────────────────────────────────────────────────────

#[tokio::test]
async fn vaccination_defaults_to_today_and_due_in_a_year() {
  let s = store().await;
  let f = fixture(&s).await;

  let v = s
    .create_vaccination(vaccination_input(f.pet))
    .await
    .unwrap();
  assert_eq!(v.vaccination_date, date(2026, 3, 15));
  assert_eq!(v.next_vaccination_date, date(2027, 3, 15));
}

#[tokio::test]
async fn supplied_due_date_is_kept_on_insert() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = vaccination_input(f.pet);
  input.vaccination_date = Some(date(2026, 1, 10));
  input.next_vaccination_date = Some(date(2026, 7, 10));
  let v = s.create_vaccination(input).await.unwrap();
  assert_eq!(v.next_vaccination_date, date(2026, 7, 10));
}

#[tokio::test]
async fn changing_vaccination_date_recomputes_due_date() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = vaccination_input(f.pet);
  input.vaccination_date = Some(date(2026, 1, 10));
  let v = s.create_vaccination(input.clone()).await.unwrap();

  input.vaccination_date = Some(date(2026, 2, 1));
  input.next_vaccination_date = Some(date(2026, 5, 1));
  let updated = s
    .update_vaccination(v.vaccination_id, input)
    .await
    .unwrap();
  assert_eq!(updated.vaccination_date, date(2026, 2, 1));
  assert_eq!(updated.next_vaccination_date, date(2027, 2, 1));
}

#[tokio::test]
async fn same_vaccination_date_keeps_supplied_due_date() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = vaccination_input(f.pet);
  input.vaccination_date = Some(date(2026, 1, 10));
  let v = s.create_vaccination(input.clone()).await.unwrap();

  input.next_vaccination_date = Some(date(2026, 9, 1));
  input.batch_number = Some("NT-2291".into());
  let updated = s
    .update_vaccination(v.vaccination_id, input)
    .await
    .unwrap();
  assert_eq!(updated.next_vaccination_date, date(2026, 9, 1));
  assert_eq!(updated.batch_number.as_deref(), Some("NT-2291"));
}

#[tokio::test]
async fn updating_other_fields_keeps_due_date() {
  let s = store().await;
  let f = fixture(&s).await;
  let v = s
    .create_vaccination(vaccination_input(f.pet))
    .await
    .unwrap();

  let mut input = vaccination_input(f.pet);
  input.vaccine_name = "Nobivac Rabies".into();
  let updated = s
    .update_vaccination(v.vaccination_id, input)
    .await
    .unwrap();
  assert_eq!(updated.vaccination_date, v.vaccination_date);
  assert_eq!(updated.next_vaccination_date, v.next_vaccination_date);
}

#[tokio::test]
async fn reschedule_moves_due_date() {
  let s = store().await;
  let f = fixture(&s).await;
  let v = s
    .create_vaccination(vaccination_input(f.pet))
    .await
    .unwrap();

  let moved = s
    .reschedule_vaccination(v.vaccination_id, date(2024, 2, 29))
    .await
    .unwrap();
  assert_eq!(moved.vaccination_date, date(2024, 2, 29));
  assert_eq!(moved.next_vaccination_date, date(2025, 2, 28));
  assert_eq!(moved.vaccine_name, v.vaccine_name);
}

#[tokio::test]
async fn add_vaccination_is_given_today() {
  let s = store().await;
  let f = fixture(&s).await;

  let v = s
    .add_vaccination(AddVaccination {
      pet_id:       f.pet,
      vet_id:       f.vet,
      clinic_id:    f.clinic,
      vaccine_name: "Rabies".into(),
      batch_number: Some("R-1".into()),
    })
    .await
    .unwrap();
  assert_eq!(v.vaccination_date, now().date());
  assert_eq!(v.next_vaccination_date, date(2027, 3, 15));
  assert_eq!(v.vet_id, Some(f.vet));
  assert_eq!(v.clinic_id, Some(f.clinic));
}

// ─── Scheduling ──────────────────────────────────────────────────────────────

fn booking(f: &Fixture, visit_date: NaiveDateTime) -> ScheduleVisit {
  ScheduleVisit {
    pet_id: f.pet,
    vet_id: f.vet,
    clinic_id: f.clinic,
    visit_date,
    reason: Some("Checkup".into()),
  }
}

#[tokio::test]
async fn schedule_visit_rejects_overlapping_booking() {
  let s = store().await;
  let f = fixture(&s).await;

  let first = s
    .schedule_visit(booking(&f, at(2026, 3, 20, 10, 0)))
    .await
    .unwrap();
  assert_eq!(first.status, VisitStatus::Scheduled);
  assert_eq!(first.diagnosis.as_deref(), Some("Checkup"));
  assert_eq!(first.total_visits_count, 1);

  let err = s
    .schedule_visit(booking(&f, at(2026, 3, 20, 10, 15)))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert!(matches!(
    core_error(err),
    vetreg_core::Error::VeterinarianBusy { conflicting, .. }
      if conflicting == first.visit_id
  ));

  s.schedule_visit(booking(&f, at(2026, 3, 20, 10, 45)))
    .await
    .unwrap();
  assert_eq!(s.list_visits(Some(f.pet)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn booking_window_is_inclusive() {
  let s = store().await;
  let f = fixture(&s).await;
  s.schedule_visit(booking(&f, at(2026, 3, 20, 10, 0)))
    .await
    .unwrap();

  let err = s
    .schedule_visit(booking(&f, at(2026, 3, 20, 10, 30)))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn cancelled_visit_does_not_block() {
  let s = store().await;
  let f = fixture(&s).await;

  let mut input = visit_input(f.pet, f.vet, f.clinic);
  input.visit_date = Some(at(2026, 3, 20, 10, 0));
  input.status = VisitStatus::Cancelled;
  s.create_visit(input).await.unwrap();

  s.schedule_visit(booking(&f, at(2026, 3, 20, 10, 0)))
    .await
    .unwrap();
}

#[tokio::test]
async fn other_veterinarian_is_free() {
  let s = store().await;
  let f = fixture(&s).await;
  let other = s
    .create_veterinarian(vet_input(f.clinic, "VET-0002"))
    .await
    .unwrap();

  s.schedule_visit(booking(&f, at(2026, 3, 20, 10, 0)))
    .await
    .unwrap();
  let mut second = booking(&f, at(2026, 3, 20, 10, 0));
  second.vet_id = other.vet_id;
  s.schedule_visit(second).await.unwrap();
}

// ─── Revenue ─────────────────────────────────────────────────────────────────

async fn completed_visit(
  s: &SqliteStore,
  f: &Fixture,
  visit_date: NaiveDateTime,
  cost: rust_decimal::Decimal,
  status: VisitStatus,
) {
  let mut input = visit_input(f.pet, f.vet, f.clinic);
  input.visit_date = Some(visit_date);
  input.cost = Some(cost);
  input.status = status;
  s.create_visit(input).await.unwrap();
}

#[tokio::test]
async fn revenue_is_zero_without_visits() {
  let s = store().await;
  let f = fixture(&s).await;

  let summary = s
    .clinic_revenue(f.clinic, date(2026, 1, 1), date(2026, 1, 31))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(0));
  assert_eq!(summary.visit_count, 0);
}

#[tokio::test]
async fn revenue_counts_completed_visits_only() {
  let s = store().await;
  let f = fixture(&s).await;

  for (when, cost, status) in [
    (at(2026, 1, 10, 10, 0), dec!(2500), VisitStatus::Completed),
    (at(2026, 1, 12, 10, 0), dec!(1200.50), VisitStatus::Completed),
    (at(2026, 1, 14, 10, 0), dec!(9999), VisitStatus::Cancelled),
    (at(2026, 1, 15, 10, 0), dec!(9999), VisitStatus::Scheduled),
    (at(2026, 2, 1, 10, 0), dec!(9999), VisitStatus::Completed),
  ] {
    completed_visit(&s, &f, when, cost, status).await;
  }

  let summary = s
    .clinic_revenue(f.clinic, date(2026, 1, 1), date(2026, 1, 31))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(3700.50));
  assert_eq!(summary.visit_count, 2);
}

#[tokio::test]
async fn revenue_range_includes_the_whole_last_day() {
  let s = store().await;
  let f = fixture(&s).await;
  let late = at(2026, 1, 31, 23, 30);
  completed_visit(&s, &f, late, dec!(100), VisitStatus::Completed).await;

  let summary = s
    .clinic_revenue(f.clinic, date(2026, 1, 31), date(2026, 1, 31))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(100));
}

#[tokio::test]
async fn reversed_revenue_range_is_invalid() {
  let s = store().await;
  let err = s
    .clinic_revenue(ClinicId(1), date(2026, 2, 1), date(2026, 1, 1))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Invalid);
}

// ─── Registration and transfer ───────────────────────────────────────────────

fn registration(phone: &str, name: &str) -> RegisterPet {
  RegisterPet {
    owner_first_name: "Ekaterina".into(),
    owner_last_name:  "Zaitseva".into(),
    owner_phone:      phone.into(),
    name:             name.into(),
    species:          "Dog".into(),
    breed:            Some("Labrador".into()),
    birth_date:       Some(date(2021, 3, 15)),
    gender:           Gender::Female,
    chip_number:      None,
  }
}

#[tokio::test]
async fn register_pet_creates_owner_once() {
  let s = store().await;

  let first = s
    .register_pet(registration("+79162345678", "Sharik"))
    .await
    .unwrap();
  assert!(first.owner_created);
  assert_eq!(first.pet.owner_id, first.owner.owner_id);
  assert_eq!(
    first.to_string(),
    "Pet Sharik registered for owner Ekaterina Zaitseva"
  );

  let second = s
    .register_pet(registration("+79162345678", "Tuzik"))
    .await
    .unwrap();
  assert!(!second.owner_created);
  assert_eq!(second.owner.owner_id, first.owner.owner_id);

  assert_eq!(s.list_owners().await.unwrap().len(), 1);
  assert_eq!(s.list_pets(Some(first.owner.owner_id)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_registration_leaves_no_owner() {
  let s = store().await;
  let f = fixture(&s).await;
  let mut chipped = pet_input(f.owner, "Rex");
  chipped.chip_number = Some("643094100000004".into());
  s.create_pet(chipped).await.unwrap();

  let mut input = registration("+79169999999", "Laika");
  input.chip_number = Some("643094100000004".into());
  let err = s.register_pet(input).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert_eq!(s.list_owners().await.unwrap().len(), 1);
}

#[tokio::test]
async fn transfer_pet_reuses_existing_owner() {
  let s = store().await;
  let f = fixture(&s).await;
  let target = s
    .create_owner(NewOwner::contact("Olga", "Lisitsyna", "+79164567890"))
    .await
    .unwrap();

  let transfer = s
    .transfer_pet(TransferPet {
      pet_id:               f.pet,
      new_owner_first_name: "Someone".into(),
      new_owner_last_name:  "Else".into(),
      new_owner_phone:      "+79164567890".into(),
    })
    .await
    .unwrap();

  assert!(!transfer.owner_created);
  assert_eq!(transfer.new_owner.owner_id, target.owner_id);
  assert_eq!(transfer.pet.owner_id, target.owner_id);
  assert_eq!(transfer.previous_owner_name, "Alexander Volkov");
  assert_eq!(s.list_owners().await.unwrap().len(), 2);
}

#[tokio::test]
async fn transfer_pet_creates_new_owner() {
  let s = store().await;
  let f = fixture(&s).await;

  let transfer = s
    .transfer_pet(TransferPet {
      pet_id:               f.pet,
      new_owner_first_name: "Mikhail".into(),
      new_owner_last_name:  "Medvedev".into(),
      new_owner_phone:      "+79163456789".into(),
    })
    .await
    .unwrap();
  assert!(transfer.owner_created);
  assert_eq!(
    transfer.to_string(),
    "Pet Barsik transferred from Alexander Volkov to new owner Mikhail Medvedev"
  );
  let pet = s.get_pet(f.pet).await.unwrap().unwrap();
  assert_eq!(pet.owner_id, transfer.new_owner.owner_id);
}

#[tokio::test]
async fn transfer_of_unknown_pet_is_not_found() {
  let s = store().await;
  let err = s
    .transfer_pet(TransferPet {
      pet_id:               PetId(404),
      new_owner_first_name: "Mikhail".into(),
      new_owner_last_name:  "Medvedev".into(),
      new_owner_phone:      "+79163456789".into(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert!(s.list_owners().await.unwrap().is_empty());
}

// ─── Reminders ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn reminders_cover_the_window_soonest_first() {
  let s = store().await;
  let f = fixture(&s).await;

  for (name, due) in [
    ("late", date(2026, 4, 20)),
    ("soon", date(2026, 3, 20)),
    ("today", date(2026, 3, 15)),
    ("overdue", date(2026, 3, 14)),
    ("edge", date(2026, 4, 14)),
  ] {
    let mut input = vaccination_input(f.pet);
    input.vaccine_name = name.into();
    input.vaccination_date = Some(date(2025, 3, 1));
    input.next_vaccination_date = Some(due);
    s.create_vaccination(input).await.unwrap();
  }

  let reminders = s.vaccination_reminders(30).await.unwrap();
  let names: Vec<_> =
    reminders.iter().map(|r| r.vaccine_name.as_str()).collect();
  assert_eq!(names, vec!["today", "soon", "edge"]);

  let first = &reminders[0];
  assert_eq!(first.pet_name, "Barsik");
  assert_eq!(first.owner_phone, "+79161234567");
  assert_eq!(first.owner_email, None);
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_clinic_removes_vets_and_keeps_history() {
  let s = store().await;
  let f = fixture(&s).await;
  let visit = s
    .create_visit(visit_input(f.pet, f.vet, f.clinic))
    .await
    .unwrap();
  let mut input = vaccination_input(f.pet);
  input.vet_id = Some(f.vet);
  input.clinic_id = Some(f.clinic);
  let vaccination = s.create_vaccination(input).await.unwrap();

  s.delete_clinic(f.clinic).await.unwrap();

  assert!(s.get_veterinarian(f.vet).await.unwrap().is_none());
  let visit = s.get_visit(visit.visit_id).await.unwrap().unwrap();
  assert_eq!(visit.clinic_id, None);
  assert_eq!(visit.vet_id, None);
  let vaccination = s
    .get_vaccination(vaccination.vaccination_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(vaccination.clinic_id, None);
  assert_eq!(vaccination.vet_id, None);
}

#[tokio::test]
async fn deleting_owner_removes_pets_and_their_records() {
  let s = store().await;
  let f = fixture(&s).await;
  s.create_visit(visit_input(f.pet, f.vet, f.clinic))
    .await
    .unwrap();
  s.create_vaccination(vaccination_input(f.pet))
    .await
    .unwrap();

  s.delete_owner(f.owner).await.unwrap();

  assert!(s.get_pet(f.pet).await.unwrap().is_none());
  assert!(s.list_visits(None).await.unwrap().is_empty());
  assert!(s.list_vaccinations(None).await.unwrap().is_empty());
  assert!(s.get_veterinarian(f.vet).await.unwrap().is_some());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_demo_data_runs_once() {
  let s = store().await;

  assert!(s.seed_demo_data().await.unwrap());
  assert!(!s.seed_demo_data().await.unwrap());

  assert_eq!(s.list_clinics().await.unwrap().len(), 4);
  assert_eq!(s.list_veterinarians(None).await.unwrap().len(), 5);
  assert_eq!(s.list_pets(None).await.unwrap().len(), 5);

  let barsik = s.list_visits(Some(PetId(1))).await.unwrap();
  let counts: Vec<_> = barsik.iter().map(|v| v.total_visits_count).collect();
  assert_eq!(counts, vec![1, 2]);

  // Continues numbering after the seeded rows.
  let visit = s
    .create_visit(visit_input(PetId(1), VetId(1), ClinicId(1)))
    .await
    .unwrap();
  assert_eq!(visit.total_visits_count, 3);
}

#[tokio::test]
async fn seed_skips_store_with_registrations() {
  let s = store().await;
  let registered = s
    .register_pet(registration("+79990000001", "Tuzik"))
    .await
    .unwrap();

  assert!(!s.seed_demo_data().await.unwrap());

  assert!(s.list_clinics().await.unwrap().is_empty());
  let owners = s.list_owners().await.unwrap();
  assert_eq!(owners, vec![registered.owner]);
  assert_eq!(s.list_pets(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reminders_with_distant_horizon_include_all_upcoming() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();

  // 2026-03-25, 2026-11-10 and 2026-12-01 are still ahead of the clock.
  for days in [3_000_000, u32::MAX] {
    let reminders = s.vaccination_reminders(days).await.unwrap();
    let pets: Vec<_> = reminders.iter().map(|r| r.pet_name.as_str()).collect();
    assert_eq!(pets, vec!["Murka", "Rex", "Laika"]);
  }
}

#[tokio::test]
async fn revenue_range_past_year_9999() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();

  let summary = s
    .clinic_revenue(ClinicId(1), date(2025, 1, 1), date(10000, 1, 1))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(9700.00));
  assert_eq!(summary.visit_count, 3);

  let summary = s
    .clinic_revenue(ClinicId(1), date(10000, 1, 1), date(10000, 12, 31))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(0));
  assert_eq!(summary.visit_count, 0);
}

#[tokio::test]
async fn seeded_revenue_and_reminders() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();

  let summary = s
    .clinic_revenue(ClinicId(1), date(2025, 1, 1), date(2025, 12, 31))
    .await
    .unwrap();
  assert_eq!(summary.total_revenue, dec!(9700.00));
  assert_eq!(summary.visit_count, 3);

  // Clock is 2026-03-15: only Purevax (2026-03-25) is due in 30 days.
  let reminders = s.vaccination_reminders(30).await.unwrap();
  assert_eq!(reminders.len(), 1);
  assert_eq!(reminders[0].pet_name, "Murka");
}
