//! HTTP front end for vetreg.
//!
//! Mounts the JSON API from `vetreg-api` under `/api` and carries the
//! runtime configuration shared by the `vetreg` binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use vetreg_core::registry::ClinicRegistry;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` layered with
/// `VETREG_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// SQLite file; a leading `~/` is expanded.
  pub database_path:  PathBuf,
  /// Load the demonstration data set into an empty database on startup.
  pub seed_demo_data: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           8080,
      database_path:  PathBuf::from("vetreg.db"),
      seed_demo_data: false,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the top-level [`Router`]: the API under `/api`, with request
/// tracing.
pub fn router<R>(registry: Arc<R>) -> Router
where
  R: ClinicRegistry + 'static,
{
  Router::new()
    .nest("/api", vetreg_api::api_router(registry))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt;
  use vetreg_store_sqlite::SqliteStore;

  use super::*;

  #[test]
  fn config_defaults_fill_missing_keys() {
    let settings = config::Config::builder()
      .set_override("port", 9090)
      .unwrap()
      .build()
      .unwrap();
    let cfg: ServerConfig = settings.try_deserialize().unwrap();
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.host, "127.0.0.1");
    assert!(!cfg.seed_demo_data);
    assert_eq!(cfg.address(), "127.0.0.1:9090");
  }

  #[test]
  fn expand_tilde_leaves_plain_paths() {
    assert_eq!(
      expand_tilde(Path::new("data/vetreg.db")),
      PathBuf::from("data/vetreg.db")
    );
  }

  #[tokio::test]
  async fn api_is_nested_under_prefix() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());

    let req = Request::builder()
      .uri("/api/clinics")
      .body(Body::empty())
      .unwrap();
    let resp = router(store.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/clinics").body(Body::empty()).unwrap();
    let resp = router(store).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
