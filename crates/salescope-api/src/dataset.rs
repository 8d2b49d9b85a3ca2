//! Handlers that describe or replace the dataset itself.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/filters` | Distinct regions and products, sorted |
//! | `POST` | `/api/reload-sample` | Regenerates the dataset; returns its size |

use std::sync::Arc;

use axum::extract::State;
use salescope_core::store::{RecordStore, distinct};
use serde::Serialize;

use crate::{
  envelope::{Envelope, Notice},
  error::ApiError,
};

pub const RELOADED_MESSAGE: &str = "Sample data regenerated";

#[derive(Debug, Serialize)]
pub struct FilterOptions {
  pub regions:  Vec<String>,
  pub products: Vec<String>,
}

/// `GET /api/filters`
pub async fn filters<S>(
  State(store): State<Arc<S>>,
) -> Result<Envelope<FilterOptions>, ApiError>
where
  S: RecordStore,
{
  // One snapshot for both lists, so a concurrent reload cannot mix them.
  let snapshot = store.snapshot().map_err(ApiError::store)?;
  Ok(Envelope::ok(FilterOptions {
    regions:  distinct(&snapshot, |r| &r.region),
    products: distinct(&snapshot, |r| &r.product),
  }))
}

/// `POST /api/reload-sample`
pub async fn reload<S>(State(store): State<Arc<S>>) -> Result<Notice, ApiError>
where
  S: RecordStore,
{
  let total = store.reload().map_err(ApiError::store)?;
  tracing::info!(total, "sample dataset regenerated");
  Ok(Notice::with_total(RELOADED_MESSAGE, total))
}
