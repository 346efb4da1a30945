//! Handlers for `/veterinarians` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/veterinarians` | Optional `?clinic_id=` |
//! | `POST`   | `/veterinarians` | Body: [`NewVeterinarian`]; returns 201 |
//! | `GET`    | `/veterinarians/{id}` | 404 if not found |
//! | `PUT`    | `/veterinarians/{id}` | Replaces the row |
//! | `DELETE` | `/veterinarians/{id}` | Returns 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vetreg_core::{
  id::{ClinicId, VetId},
  model::{Entity, NewVeterinarian, Veterinarian},
  registry::ClinicRegistry,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub clinic_id: Option<ClinicId>,
}

/// `GET /veterinarians[?clinic_id=<id>]`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Veterinarian>>, ApiError> {
  let vets = registry
    .list_veterinarians(params.clinic_id)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(vets))
}

/// `POST /veterinarians`
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewVeterinarian>,
) -> Result<impl IntoResponse, ApiError> {
  let vet = registry
    .create_veterinarian(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(vet)))
}

/// `GET /veterinarians/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VetId>,
) -> Result<Json<Veterinarian>, ApiError> {
  let vet = registry
    .get_veterinarian(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Veterinarian, id))?;
  Ok(Json(vet))
}

/// `PUT /veterinarians/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VetId>,
  Json(body): Json<NewVeterinarian>,
) -> Result<Json<Veterinarian>, ApiError> {
  let vet = registry
    .update_veterinarian(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(vet))
}

/// `DELETE /veterinarians/{id}`
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<VetId>,
) -> Result<StatusCode, ApiError> {
  registry
    .delete_veterinarian(id)
    .await
    .map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}
