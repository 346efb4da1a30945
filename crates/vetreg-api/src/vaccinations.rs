//! Handlers for `/vaccinations` endpoints and the reminder report.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/vaccinations` | Optional `?pet_id=` |
//! | `POST`   | `/vaccinations` | Body: [`NewVaccination`]; dates default to today / one year on |
//! | `GET`    | `/vaccinations/{id}` | 404 if not found |
//! | `PUT`    | `/vaccinations/{id}` | A changed date recomputes the due date |
//! | `DELETE` | `/vaccinations/{id}` | Returns 204 |
//! | `POST`   | `/vaccinations/administer` | Body: [`AddVaccination`]; given today |
//! | `POST`   | `/vaccinations/{id}/reschedule` | Body: `{"vaccination_date":"YYYY-MM-DD"}` |
//! | `GET`    | `/reminders` | `?days=` (default 30) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use vetreg_core::{
  id::{PetId, VaccinationId},
  model::{Entity, NewVaccination, Vaccination},
  registry::ClinicRegistry,
  report::{AddVaccination, VaccinationReminder},
};

use crate::error::ApiError;

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub pet_id: Option<PetId>,
}

/// `GET /vaccinations[?pet_id=<id>]`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Vaccination>>, ApiError> {
  let vaccinations = registry
    .list_vaccinations(params.pet_id)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(vaccinations))
}

/// `POST /vaccinations`
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewVaccination>,
) -> Result<impl IntoResponse, ApiError> {
  let vaccination = registry
    .create_vaccination(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(vaccination)))
}

/// `GET /vaccinations/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VaccinationId>,
) -> Result<Json<Vaccination>, ApiError> {
  let vaccination = registry
    .get_vaccination(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Vaccination, id))?;
  Ok(Json(vaccination))
}

/// `PUT /vaccinations/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VaccinationId>,
  Json(body): Json<NewVaccination>,
) -> Result<Json<Vaccination>, ApiError> {
  let vaccination = registry
    .update_vaccination(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(vaccination))
}

/// `DELETE /vaccinations/{id}`
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VaccinationId>,
) -> Result<StatusCode, ApiError> {
  registry
    .delete_vaccination(id)
    .await
    .map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// `POST /vaccinations/administer`
pub async fn administer<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<AddVaccination>,
) -> Result<impl IntoResponse, ApiError> {
  let vaccination = registry
    .add_vaccination(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(vaccination)))
}

#[derive(Debug, Deserialize)]
pub struct RescheduleBody {
  pub vaccination_date: NaiveDate,
}

/// `POST /vaccinations/{id}/reschedule`
pub async fn reschedule<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VaccinationId>,
  Json(body): Json<RescheduleBody>,
) -> Result<Json<Vaccination>, ApiError> {
  let vaccination = registry
    .reschedule_vaccination(id, body.vaccination_date)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(vaccination))
}

// ─── Reminders ───────────────────────────────────────────────────────────────

fn default_days() -> u32 { 30 }

#[derive(Debug, Deserialize)]
pub struct ReminderParams {
  /// Horizon in days from today, inclusive.
  #[serde(default = "default_days")]
  pub days: u32,
}

/// `GET /reminders[?days=<n>]`
pub async fn reminders<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Query(params): Query<ReminderParams>,
) -> Result<Json<Vec<VaccinationReminder>>, ApiError> {
  let reminders = registry
    .vaccination_reminders(params.days)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(reminders))
}
