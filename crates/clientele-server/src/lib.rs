//! HTTP server assembly for clientele.
//!
//! Holds the runtime configuration and wires a [`ClientService`] into the
//! API router with request tracing.

use std::path::{Path, PathBuf};

use axum::Router;
use clientele_core::{service::ClientService, store::ClientStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment variable prefix, e.g. `CLIENTELE_PORT=8080`.
pub const ENV_PREFIX: &str = "CLIENTELE";

/// Which [`ClientStore`] backend the server runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  Sqlite,
  Memory,
}

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub backend:    StoreBackend,
  /// Ignored by the memory backend.
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       5080,
      backend:    StoreBackend::default(),
      store_path: PathBuf::from("clientele.db"),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `CLIENTELE_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

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

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: `/clients` routes wrapped in HTTP tracing.
pub fn app<S>(service: ClientService<S>) -> Router
where
  S: ClientStore + 'static,
{
  clientele_api::api_router(service).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use clientele_store_sqlite::SqliteStore;
  use config::{Config, File, FileFormat};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn from_toml(toml: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn empty_config_uses_defaults() {
    assert_eq!(from_toml(""), ServerConfig::default());
  }

  #[test]
  fn config_fields_override_defaults() {
    let cfg = from_toml(
      r#"
        host       = "0.0.0.0"
        port       = 9000
        backend    = "memory"
        store_path = "~/clients.db"
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:9000");
    assert_eq!(cfg.backend, StoreBackend::Memory);
    assert_eq!(cfg.store_path, PathBuf::from("~/clients.db"));
  }

  #[test]
  fn unknown_backend_is_rejected() {
    let result = Config::builder()
      .add_source(File::from_str(r#"backend = "postgres""#, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize::<ServerConfig>();
    assert!(result.is_err());
  }

  #[test]
  fn missing_config_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/clientele.toml")).unwrap();
    assert_eq!(cfg.store_path, ServerConfig::default().store_path);
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, bytes.to_vec())
  }

  #[tokio::test]
  async fn crud_over_sqlite() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = app(ClientService::new(Arc::new(store)));

    let (status, body) = call(
      app.clone(),
      "POST",
      "/clients",
      Some(json!({ "name": "Alice", "email": "a@b.com", "cellphone": "0501234567" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id: i64 = serde_json::from_slice(&body).unwrap();

    let (status, body) = call(
      app.clone(),
      "PUT",
      &format!("/clients/{id}"),
      Some(json!({
        "name": "Alice",
        "email": "alice@b.com",
        "cellphone": "+972501234567",
        "emailStatus": 1,
        "smsStatus": 0,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = call(app.clone(), "GET", &format!("/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(view["email"], "alice@b.com");
    assert_eq!(view["cellphone"], "+972501234567");
    assert_eq!(view["smsStatus"], 0);

    let (status, _) = call(app.clone(), "DELETE", &format!("/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(app, "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
  }
}
