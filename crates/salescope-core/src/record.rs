//! The sales record — one transactional observation.

use chrono::NaiveDate;
use serde::Serialize;

/// Regions the synthetic generator draws from by default.
pub const DEFAULT_REGIONS: &[&str] = &["North", "South", "East", "West", "Central"];

/// Products the synthetic generator draws from by default.
pub const DEFAULT_PRODUCTS: &[&str] =
  &["Laptop", "Phone", "Tablet", "Monitor", "Accessories"];

/// A single sale. Records are immutable once generated; the store only ever
/// replaces the whole sequence.
///
/// `date` serialises as `YYYY-MM-DD`. `NaiveDate` ordering matches the
/// lexicographic order of that form, so range checks compare dates directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
  pub id:      u64,
  pub date:    NaiveDate,
  pub region:  String,
  pub product: String,
  pub sales:   f64,
  /// Not bounded by `sales`.
  pub profit:  f64,
}

impl SalesRecord {
  pub fn new(
    id: u64,
    date: NaiveDate,
    region: impl Into<String>,
    product: impl Into<String>,
    sales: f64,
    profit: f64,
  ) -> Self {
    Self {
      id,
      date,
      region: region.into(),
      product: product.into(),
      sales,
      profit,
    }
  }
}
