//! Handlers for `/visits` endpoints.
//!
//! `POST /visits` records a visit as-is; `POST /visits/schedule` books one
//! and rejects it with 409 when the veterinarian is already taken.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vetreg_core::{
  id::{PetId, VisitId},
  model::{Entity, NewVisit, Visit},
  registry::ClinicRegistry,
  report::ScheduleVisit,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub pet_id: Option<PetId>,
}

/// `GET /visits[?pet_id=<id>]`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Visit>>, ApiError> {
  let visits = registry
    .list_visits(params.pet_id)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(visits))
}

/// `POST /visits`
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewVisit>,
) -> Result<impl IntoResponse, ApiError> {
  let visit = registry
    .create_visit(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(visit)))
}

/// `GET /visits/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VisitId>,
) -> Result<Json<Visit>, ApiError> {
  let visit = registry
    .get_visit(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Visit, id))?;
  Ok(Json(visit))
}

/// `PUT /visits/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VisitId>,
  Json(body): Json<NewVisit>,
) -> Result<Json<Visit>, ApiError> {
  let visit = registry
    .update_visit(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(visit))
}

/// `DELETE /visits/{id}`
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VisitId>,
) -> Result<StatusCode, ApiError> {
  registry.delete_visit(id).await.map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /visits/schedule`
pub async fn schedule<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<ScheduleVisit>,
) -> Result<impl IntoResponse, ApiError> {
  let visit = registry
    .schedule_visit(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(visit)))
}
