//! Composition root for the Salescope server.
//!
//! Reads layered configuration, builds the in-memory store, and wraps the
//! API router in the HTTP middleware stack.

use std::{path::Path, sync::Arc};

use axum::Router;
use config::{Config, ConfigError, Environment, File, Source};
use salescope_core::{generate::GeneratorConfig, store::MemoryStore};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const ENV_PREFIX: &str = "SALESCOPE";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// `SALESCOPE_*` environment variables, then [`Overrides`] from the CLI.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// Days of synthetic data per generated dataset.
  pub days:            u32,
  pub seed:            Option<u64>,
  pub cors_permissive: bool,
}

impl ServerConfig {
  /// Load from `path` (optional) and the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::layered(
      File::from(path).required(false),
      Environment::with_prefix(ENV_PREFIX),
    )
  }

  fn layered<F, E>(file: F, env: E) -> Result<Self, ConfigError>
  where
    F: Source + Send + Sync + 'static,
    E: Source + Send + Sync + 'static,
  {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5000_i64)?
      .set_default("days", 120_i64)?
      .set_default("cors_permissive", true)?
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn generator(&self) -> GeneratorConfig {
    GeneratorConfig {
      days: self.days,
      seed: self.seed,
      ..GeneratorConfig::default()
    }
  }
}

/// Command-line values that win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub host: Option<String>,
  pub port: Option<u16>,
  pub seed: Option<u64>,
}

impl Overrides {
  pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
    if let Some(host) = self.host {
      config.host = host;
    }
    if let Some(port) = self.port {
      config.port = port;
    }
    if self.seed.is_some() {
      config.seed = self.seed;
    }
    config
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the store and the fully layered router.
pub fn app(config: &ServerConfig) -> anyhow::Result<Router> {
  let store = MemoryStore::new(config.generator())?;
  let mut app =
    salescope_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  if config.cors_permissive {
    app = app.layer(CorsLayer::permissive());
  }
  Ok(app)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  fn from_toml(toml: &str) -> ServerConfig {
    ServerConfig::layered(
      File::from_str(toml, FileFormat::Toml),
      Environment::with_prefix("SALESCOPE_TEST_UNSET"),
    )
    .unwrap()
  }

  #[test]
  fn defaults_apply_without_a_file() {
    let config = from_toml("");
    assert_eq!(
      config,
      ServerConfig {
        host:            "0.0.0.0".to_string(),
        port:            5000,
        days:            120,
        seed:            None,
        cors_permissive: true,
      }
    );
    assert_eq!(config.address(), "0.0.0.0:5000");
  }

  #[test]
  fn file_values_override_defaults() {
    let config = from_toml("port = 8080\nseed = 42\ncors_permissive = false\n");
    assert_eq!(config.port, 8080);
    assert_eq!(config.seed, Some(42));
    assert!(!config.cors_permissive);
    assert_eq!(config.days, 120);
  }

  #[test]
  fn cli_overrides_win() {
    let config = Overrides {
      host: Some("127.0.0.1".into()),
      port: Some(9000),
      seed: None,
    }
    .apply(from_toml("seed = 5\n"));
    assert_eq!(config.address(), "127.0.0.1:9000");
    assert_eq!(config.seed, Some(5));
  }

  #[tokio::test]
  async fn app_serves_api_with_cors() {
    let config = from_toml("days = 3\nseed = 1\n");
    let req = Request::builder()
      .uri("/api/kpis")
      .header(header::ORIGIN, "http://dashboard.example")
      .body(Body::empty())
      .unwrap();
    let resp = app(&config).unwrap().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let orders = body["data"]["orders"].as_u64().unwrap();
    assert!((3 * 4..=3 * 9).contains(&orders));
  }

  #[test]
  fn app_rejects_zero_days() {
    let config = from_toml("days = 0\n");
    assert!(app(&config).is_err());
  }

  #[test]
  fn app_rejects_days_past_the_limit() {
    let config = from_toml("days = 4000000000\n");
    let err = app(&config).unwrap_err();
    assert!(err.to_string().contains("4000000000"), "{err}");
  }
}
