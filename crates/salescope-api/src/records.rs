//! Handler for `GET /api/records`: filter, sort, then paginate.

use std::sync::Arc;

use axum::extract::State;
use salescope_core::{
  filter::apply,
  query::sort,
  record::SalesRecord,
  store::RecordStore,
};
use serde::Serialize;

use crate::{
  envelope::Envelope,
  error::ApiError,
  params::{QueryPairs, RawQuery, RecordsParams},
};

#[derive(Debug, Serialize)]
pub struct PageMeta {
  pub total: usize,
  pub page:  usize,
  pub limit: usize,
}

/// `GET /api/records[?start&end&region&product&page&limit&sort&order]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  query: RawQuery,
) -> Result<Envelope<Vec<SalesRecord>, PageMeta>, ApiError>
where
  S: RecordStore,
{
  let params = RecordsParams::from_pairs(&QueryPairs::lenient(query));
  let criteria = params.criteria.criteria();
  let page = params.page();

  let snapshot = store.snapshot().map_err(ApiError::store)?;
  let mut matched = apply(&snapshot, &criteria);
  sort(&mut matched, params.sort_key(), params.sort_order());

  tracing::debug!(?criteria, ?page, total = matched.len(), "listing records");

  let data = page.slice(&matched).iter().map(|r| (*r).clone()).collect();
  Ok(Envelope::with_meta(data, PageMeta {
    total: matched.len(),
    page:  page.page,
    limit: page.limit,
  }))
}
