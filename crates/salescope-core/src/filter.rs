//! Narrowing a dataset by date range, region, and product.

use chrono::{DateTime, NaiveDate};

use crate::record::SalesRecord;

/// Sentinel meaning "every region" / "every product".
pub const ALL: &str = "All";

/// Per-request constraints. `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
  pub start:   Option<NaiveDate>,
  pub end:     Option<NaiveDate>,
  pub region:  Option<String>,
  pub product: Option<String>,
}

impl Criteria {
  /// Build criteria from raw query text, normalising as it goes.
  ///
  /// Unparseable dates become absent bounds. `"All"` and empty strings
  /// become absent region/product constraints.
  pub fn from_raw(
    start: Option<&str>,
    end: Option<&str>,
    region: Option<&str>,
    product: Option<&str>,
  ) -> Self {
    Self {
      start:   start.and_then(parse_day),
      end:     end.and_then(parse_day),
      region:  region.and_then(dimension),
      product: product.and_then(dimension),
    }
  }

  /// Whether `record` satisfies every present constraint.
  pub fn matches(&self, record: &SalesRecord) -> bool {
    in_range(record.date, self.start, self.end)
      && self.region.as_deref().is_none_or(|r| record.region == r)
      && self.product.as_deref().is_none_or(|p| record.product == p)
  }
}

/// Inclusive on both bounds.
pub fn in_range(
  date: NaiveDate,
  start: Option<NaiveDate>,
  end: Option<NaiveDate>,
) -> bool {
  start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

/// Keep the records matching `criteria`, in input order.
pub fn apply<'a>(
  records: &'a [SalesRecord],
  criteria: &Criteria,
) -> Vec<&'a SalesRecord> {
  records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date).
///
/// The year is exactly four digits. Signed or extended years that chrono
/// would otherwise accept are rejected.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  if !raw.get(..10).is_some_and(is_iso_day) {
    return None;
  }
  if raw.len() == 10 {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
  } else {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
  }
}

/// `DDDD-DD-DD` shape check.
fn is_iso_day(s: &str) -> bool {
  s.bytes().enumerate().all(|(i, b)| match i {
    4 | 7 => b == b'-',
    _ => b.is_ascii_digit(),
  })
}

fn dimension(raw: &str) -> Option<String> {
  let raw = raw.trim();
  (!raw.is_empty() && raw != ALL).then(|| raw.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn dataset() -> Vec<SalesRecord> {
    vec![
      SalesRecord::new(1, day("2025-01-01"), "North", "Phone", 100.0, 20.0),
      SalesRecord::new(2, day("2025-01-02"), "South", "Laptop", 300.0, 90.0),
      SalesRecord::new(3, day("2025-01-03"), "North", "Laptop", 50.0, 5.0),
      SalesRecord::new(4, day("2025-01-04"), "East", "Phone", 75.0, 10.0),
    ]
  }

  fn ids(records: &[&SalesRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
  }

  #[test]
  fn no_criteria_keeps_everything_in_order() {
    let data = dataset();
    assert_eq!(ids(&apply(&data, &Criteria::default())), vec![1, 2, 3, 4]);
  }

  #[test]
  fn date_bounds_are_inclusive() {
    let data = dataset();
    let c = Criteria::from_raw(Some("2025-01-02"), Some("2025-01-03"), None, None);
    assert_eq!(ids(&apply(&data, &c)), vec![2, 3]);
  }

  #[test]
  fn open_ended_ranges() {
    let data = dataset();
    let from = Criteria::from_raw(Some("2025-01-03"), None, None, None);
    assert_eq!(ids(&apply(&data, &from)), vec![3, 4]);
    let until = Criteria::from_raw(None, Some("2025-01-01"), None, None);
    assert_eq!(ids(&apply(&data, &until)), vec![1]);
  }

  #[test]
  fn malformed_dates_are_ignored() {
    let data = dataset();
    let c = Criteria::from_raw(Some("yesterday"), Some("2025-13-45"), None, None);
    assert_eq!(c.start, None);
    assert_eq!(c.end, None);
    assert_eq!(apply(&data, &c).len(), 4);
  }

  #[test]
  fn only_four_digit_years_are_accepted() {
    for raw in [
      "-262143-01-01",
      "+2025-01-01",
      "12025-01-01",
      "2025-1-5",
      "2025/01/05",
      "2025-01-05junk",
      "+262142-12-31T00:00:00Z",
    ] {
      assert_eq!(parse_day(raw), None, "{raw}");
    }
    assert_eq!(parse_day(" 2025-01-05 "), Some(day("2025-01-05")));
    assert_eq!(parse_day("0001-01-01"), Some(day("0001-01-01")));
  }

  #[test]
  fn timestamps_normalise_to_their_day() {
    let c = Criteria::from_raw(Some("2025-01-02T23:59:00Z"), None, None, None);
    assert_eq!(c.start, Some(day("2025-01-02")));
  }

  #[test]
  fn region_and_product_match_exactly() {
    let data = dataset();
    let c = Criteria::from_raw(None, None, Some("North"), Some("Laptop"));
    assert_eq!(ids(&apply(&data, &c)), vec![3]);
    let lower = Criteria::from_raw(None, None, Some("north"), None);
    assert!(apply(&data, &lower).is_empty());
  }

  #[test]
  fn all_sentinel_means_no_constraint() {
    let data = dataset();
    let c = Criteria::from_raw(None, None, Some("All"), Some(""));
    assert_eq!(c, Criteria::default());
    assert_eq!(apply(&data, &c).len(), 4);
  }
}
