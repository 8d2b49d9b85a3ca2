//! Query-string shapes and their lossy coercion.
//!
//! The query is extracted as raw `key=value` pairs, so one bad or repeated
//! key only affects its own field. Each field is then coerced on its own by
//! the core parsers, and a field that fails falls back to its default.

use axum::extract::{Query, rejection::QueryRejection};
use salescope_core::{
  filter::Criteria,
  query::{Page, SortKey, SortOrder},
};

/// The extractor every read handler takes.
pub type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Decoded query pairs, in request order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
  /// Unwrap the extractor. A rejected query string reads as empty.
  pub fn lenient(query: RawQuery) -> Self {
    match query {
      Ok(Query(pairs)) => Self(pairs),
      Err(rejection) => {
        tracing::debug!(%rejection, "unreadable query string, using defaults");
        Self::default()
      }
    }
  }

  /// The first value given for `key`; repeats are ignored.
  pub fn first(&self, key: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

impl From<Vec<(String, String)>> for QueryPairs {
  fn from(pairs: Vec<(String, String)>) -> Self { Self(pairs) }
}

/// `start`, `end`, `region`, `product`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CriteriaParams {
  pub start:   Option<String>,
  pub end:     Option<String>,
  pub region:  Option<String>,
  pub product: Option<String>,
}

impl CriteriaParams {
  pub fn from_pairs(pairs: &QueryPairs) -> Self {
    let take = |key: &str| pairs.first(key).map(str::to_owned);
    Self {
      start:   take("start"),
      end:     take("end"),
      region:  take("region"),
      product: take("product"),
    }
  }

  pub fn criteria(&self) -> Criteria {
    Criteria::from_raw(
      self.start.as_deref(),
      self.end.as_deref(),
      self.region.as_deref(),
      self.product.as_deref(),
    )
  }
}

/// Criteria plus `page`, `limit`, `sort`, `order`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordsParams {
  pub criteria: CriteriaParams,
  pub page:     Option<String>,
  pub limit:    Option<String>,
  pub sort:     Option<String>,
  pub order:    Option<String>,
}

impl RecordsParams {
  pub fn from_pairs(pairs: &QueryPairs) -> Self {
    let take = |key: &str| pairs.first(key).map(str::to_owned);
    Self {
      criteria: CriteriaParams::from_pairs(pairs),
      page:     take("page"),
      limit:    take("limit"),
      sort:     take("sort"),
      order:    take("order"),
    }
  }

  pub fn page(&self) -> Page {
    Page::parse_lossy(self.page.as_deref(), self.limit.as_deref())
  }

  pub fn sort_key(&self) -> SortKey { SortKey::parse_lossy(self.sort.as_deref()) }

  pub fn sort_order(&self) -> SortOrder {
    SortOrder::parse_lossy(self.order.as_deref())
  }
}
