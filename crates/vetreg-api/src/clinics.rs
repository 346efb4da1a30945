//! Handlers for `/clinics` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/clinics` | All clinics |
//! | `POST`   | `/clinics` | Body: [`NewClinic`]; returns 201 |
//! | `GET`    | `/clinics/{id}` | 404 if not found |
//! | `PUT`    | `/clinics/{id}` | Body: [`NewClinic`]; replaces the row |
//! | `DELETE` | `/clinics/{id}` | Cascades to veterinarians; returns 204 |
//! | `GET`    | `/clinics/{id}/revenue` | `?from=YYYY-MM-DD&to=YYYY-MM-DD` |

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
  id::ClinicId,
  model::{Clinic, Entity, NewClinic},
  registry::ClinicRegistry,
  report::RevenueSummary,
};

use crate::error::ApiError;

/// `GET /clinics`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
) -> Result<Json<Vec<Clinic>>, ApiError> {
  let clinics = registry.list_clinics().await.map_err(ApiError::registry)?;
  Ok(Json(clinics))
}

/// `POST /clinics`
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewClinic>,
) -> Result<impl IntoResponse, ApiError> {
  let clinic = registry
    .create_clinic(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(clinic)))
}

/// `GET /clinics/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<ClinicId>,
) -> Result<Json<Clinic>, ApiError> {
  let clinic = registry
    .get_clinic(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Clinic, id))?;
  Ok(Json(clinic))
}

/// `PUT /clinics/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<ClinicId>,
  Json(body): Json<NewClinic>,
) -> Result<Json<Clinic>, ApiError> {
  let clinic = registry
    .update_clinic(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(clinic))
}

/// `DELETE /clinics/{id}`
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<ClinicId>,
) -> Result<StatusCode, ApiError> {
  registry
    .delete_clinic(id)
    .await
    .map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Revenue ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RevenueParams {
  /// First day of the range, inclusive.
  pub from: NaiveDate,
  /// Last day of the range, inclusive.
  pub to:   NaiveDate,
}

/// `GET /clinics/{id}/revenue?from=<date>&to=<date>`
pub async fn revenue<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<ClinicId>,
  Query(params): Query<RevenueParams>,
) -> Result<Json<RevenueSummary>, ApiError> {
  let summary = registry
    .clinic_revenue(id, params.from, params.to)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(summary))
}
