//! Handlers for `/owners` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use vetreg_core::{
  id::OwnerId,
  model::{Entity, NewOwner, Owner},
  registry::ClinicRegistry,
};

use crate::error::ApiError;

/// `GET /owners`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
) -> Result<Json<Vec<Owner>>, ApiError> {
  let owners = registry.list_owners().await.map_err(ApiError::registry)?;
  Ok(Json(owners))
}

/// `POST /owners`; `registration_date` defaults to today.
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewOwner>,
) -> Result<impl IntoResponse, ApiError> {
  let owner = registry
    .create_owner(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(owner)))
}

/// `GET /owners/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<OwnerId>,
) -> Result<Json<Owner>, ApiError> {
  let owner = registry
    .get_owner(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Owner, id))?;
  Ok(Json(owner))
}

/// `PUT /owners/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<OwnerId>,
  Json(body): Json<NewOwner>,
) -> Result<Json<Owner>, ApiError> {
  let owner = registry
    .update_owner(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(owner))
}

/// `DELETE /owners/{id}` also removes the owner's pets and their history.
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<OwnerId>,
) -> Result<StatusCode, ApiError> {
  registry.delete_owner(id).await.map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}
