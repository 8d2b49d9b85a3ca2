//! JSON HTTP API for Salescope.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. Tracing, CORS,
//! and transport concerns are the caller's responsibility; panics inside
//! handlers are caught here and answered with the generic 500 envelope.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = salescope_api::api_router(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod analytics;
pub mod dataset;
pub mod envelope;
pub mod error;
pub mod params;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use salescope_core::store::RecordStore;
use tower_http::catch_panic::CatchPanicLayer;

pub use error::ApiError;

use envelope::Notice;

pub const LIVENESS_MESSAGE: &str = "Salescope analytics API is running";

/// Build the full API router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/", get(liveness))
    .route("/api/filters", get(dataset::filters::<S>))
    .route("/api/records", get(records::list::<S>))
    .route("/api/kpis", get(analytics::kpis::<S>))
    .route("/api/insights", get(analytics::insights::<S>))
    .route("/api/reload-sample", post(dataset::reload::<S>))
    .fallback(error::not_found)
    .method_not_allowed_fallback(error::not_found)
    .layer(CatchPanicLayer::custom(error::panic_response))
    .with_state(store)
}

/// `GET /`
async fn liveness() -> Notice { Notice::new(LIVENESS_MESSAGE) }

// ─── Integration tests ────────────────────────────────────────────────────────
