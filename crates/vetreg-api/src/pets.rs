//! Handlers for `/pets` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/pets` | Optional `?owner_id=` |
//! | `POST`   | `/pets` | Body: [`NewPet`]; returns 201 |
//! | `GET`    | `/pets/{id}` | 404 if not found |
//! | `PUT`    | `/pets/{id}` | Replaces the row |
//! | `DELETE` | `/pets/{id}` | Returns 204 |
//! | `POST`   | `/pets/register` | Body: [`RegisterPet`]; creates the owner if the phone is new |
//! | `POST`   | `/pets/{id}/transfer` | Body: [`TransferBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vetreg_core::{
  id::{OwnerId, PetId},
  model::{Entity, NewPet, Pet},
  registry::ClinicRegistry,
  report::{PetTransfer, RegisterPet, TransferPet},
};

use crate::error::ApiError;

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub owner_id: Option<OwnerId>,
}

/// `GET /pets[?owner_id=<id>]`
pub async fn list<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Pet>>, ApiError> {
  let pets = registry
    .list_pets(params.owner_id)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(pets))
}

/// `POST /pets`
pub async fn create<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<NewPet>,
) -> Result<impl IntoResponse, ApiError> {
  let pet = registry.create_pet(body).await.map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(pet)))
}

/// `GET /pets/{id}`
pub async fn get_one<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<PetId>,
) -> Result<Json<Pet>, ApiError> {
  let pet = registry
    .get_pet(id)
    .await
    .map_err(ApiError::registry)?
    .ok_or_else(|| ApiError::missing(Entity::Pet, id))?;
  Ok(Json(pet))
}

/// `PUT /pets/{id}`
pub async fn replace<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<PetId>,
  Json(body): Json<NewPet>,
) -> Result<Json<Pet>, ApiError> {
  let pet = registry
    .update_pet(id, body)
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(pet))
}

/// `DELETE /pets/{id}`
pub async fn delete<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<PetId>,
) -> Result<StatusCode, ApiError> {
  registry.delete_pet(id).await.map_err(ApiError::registry)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Registration ────────────────────────────────────────────────────────────

/// `POST /pets/register`
pub async fn register<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Json(body): Json<RegisterPet>,
) -> Result<impl IntoResponse, ApiError> {
  let registration = registry
    .register_pet(body)
    .await
    .map_err(ApiError::registry)?;
  Ok((StatusCode::CREATED, Json(registration)))
}

// ─── Transfer ────────────────────────────────────────────────────────────────

/// The new owner's contact; the pet comes from the path.
#[derive(Debug, Deserialize)]
pub struct TransferBody {
  pub first_name: String,
  pub last_name:  String,
  pub phone:      String,
}

/// `POST /pets/{id}/transfer`
pub async fn transfer<R: ClinicRegistry>(
  State(registry): State<Arc<R>>,
  Path(id): Path<PetId>,
  Json(body): Json<TransferBody>,
) -> Result<Json<PetTransfer>, ApiError> {
  let transfer = registry
    .transfer_pet(TransferPet {
      pet_id:               id,
      new_owner_first_name: body.first_name,
      new_owner_last_name:  body.last_name,
      new_owner_phone:      body.phone,
    })
    .await
    .map_err(ApiError::registry)?;
  Ok(Json(transfer))
}
