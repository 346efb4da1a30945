//! JSON REST API for vetreg.
//!
//! Exposes an axum [`Router`] backed by any
//! [`vetreg_core::registry::ClinicRegistry`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vetreg_api::api_router(registry.clone()))
//! ```

pub mod clinics;
pub mod error;
pub mod owners;
pub mod pets;
pub mod vaccinations;
pub mod veterinarians;
pub mod visits;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use vetreg_core::registry::ClinicRegistry;

pub use error::ApiError;

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R>(registry: Arc<R>) -> Router<()>
where
  R: ClinicRegistry + 'static,
{
  Router::new()
    // Clinics
    .route("/clinics", get(clinics::list::<R>).post(clinics::create::<R>))
    .route(
      "/clinics/{id}",
      get(clinics::get_one::<R>)
        .put(clinics::replace::<R>)
        .delete(clinics::delete::<R>),
    )
    .route("/clinics/{id}/revenue", get(clinics::revenue::<R>))
    // Veterinarians
    .route(
      "/veterinarians",
      get(veterinarians::list::<R>).post(veterinarians::create::<R>),
    )
    .route(
      "/veterinarians/{id}",
      get(veterinarians::get_one::<R>)
        .put(veterinarians::replace::<R>)
        .delete(veterinarians::delete::<R>),
    )
    // Owners
    .route("/owners", get(owners::list::<R>).post(owners::create::<R>))
    .route(
      "/owners/{id}",
      get(owners::get_one::<R>)
        .put(owners::replace::<R>)
        .delete(owners::delete::<R>),
    )
    // Pets
    .route("/pets", get(pets::list::<R>).post(pets::create::<R>))
    .route("/pets/register", post(pets::register::<R>))
    .route(
      "/pets/{id}",
      get(pets::get_one::<R>)
        .put(pets::replace::<R>)
        .delete(pets::delete::<R>),
    )
    .route("/pets/{id}/transfer", post(pets::transfer::<R>))
    // Visits
    .route("/visits", get(visits::list::<R>).post(visits::create::<R>))
    .route("/visits/schedule", post(visits::schedule::<R>))
    .route(
      "/visits/{id}",
      get(visits::get_one::<R>)
        .put(visits::replace::<R>)
        .delete(visits::delete::<R>),
    )
    // Vaccinations
    .route(
      "/vaccinations",
      get(vaccinations::list::<R>).post(vaccinations::create::<R>),
    )
    .route("/vaccinations/administer", post(vaccinations::administer::<R>))
    .route(
      "/vaccinations/{id}",
      get(vaccinations::get_one::<R>)
        .put(vaccinations::replace::<R>)
        .delete(vaccinations::delete::<R>),
    )
    .route(
      "/vaccinations/{id}/reschedule",
      post(vaccinations::reschedule::<R>),
    )
    // Reports
    .route("/reminders", get(vaccinations::reminders::<R>))
    .with_state(registry)
}
