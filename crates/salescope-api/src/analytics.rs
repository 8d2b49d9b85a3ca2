//! Handlers for `GET /api/kpis` and `GET /api/insights`.
//!
//! Both accept the criteria parameters only (`start`, `end`, `region`,
//! `product`).

use std::sync::Arc;

use axum::extract::State;
use salescope_core::{
  aggregate::{self, Insights, Kpis},
  filter::apply,
  store::RecordStore,
};

use crate::{
  envelope::Envelope,
  error::ApiError,
  params::{CriteriaParams, QueryPairs, RawQuery},
};

/// `GET /api/kpis`
///
/// Growth is only computed when both `start` and `end` parse; its baseline
/// is drawn from the unfiltered dataset.
pub async fn kpis<S>(
  State(store): State<Arc<S>>,
  query: RawQuery,
) -> Result<Envelope<Kpis>, ApiError>
where
  S: RecordStore,
{
  let pairs = QueryPairs::lenient(query);
  let criteria = CriteriaParams::from_pairs(&pairs).criteria();
  let snapshot = store.snapshot().map_err(ApiError::store)?;
  let matched = apply(&snapshot, &criteria);
  Ok(Envelope::ok(aggregate::kpis(
    &matched,
    &snapshot,
    criteria.start,
    criteria.end,
  )))
}

/// `GET /api/insights`
pub async fn insights<S>(
  State(store): State<Arc<S>>,
  query: RawQuery,
) -> Result<Envelope<Insights>, ApiError>
where
  S: RecordStore,
{
  let pairs = QueryPairs::lenient(query);
  let criteria = CriteriaParams::from_pairs(&pairs).criteria();
  let snapshot = store.snapshot().map_err(ApiError::store)?;
  let matched = apply(&snapshot, &criteria);
  Ok(Envelope::ok(aggregate::insights(&matched)))
}
