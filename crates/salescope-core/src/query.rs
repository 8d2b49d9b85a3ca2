//! Ordering and paging of a filtered record set.

use std::cmp::Ordering;

use crate::record::SalesRecord;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
  #[default]
  Date,
  Sales,
  Profit,
}

impl SortKey {
  /// Unknown keys fall back to [`SortKey::Date`].
  pub fn parse_lossy(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      Some("sales") => Self::Sales,
      Some("profit") => Self::Profit,
      _ => Self::Date,
    }
  }

  fn compare(self, a: &SalesRecord, b: &SalesRecord) -> Ordering {
    match self {
      Self::Date => a.date.cmp(&b.date),
      Self::Sales => a.sales.total_cmp(&b.sales),
      Self::Profit => a.profit.total_cmp(&b.profit),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  /// Anything other than `desc` is ascending.
  pub fn parse_lossy(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      Some("desc") => Self::Desc,
      _ => Self::Asc,
    }
  }
}

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub page:  usize,
  pub limit: usize,
}

impl Default for Page {
  fn default() -> Self {
    Self {
      page:  DEFAULT_PAGE,
      limit: DEFAULT_LIMIT,
    }
  }
}

impl Page {
  /// Coerce raw query text. Non-numeric or non-positive input falls back to
  /// the defaults.
  pub fn parse_lossy(page: Option<&str>, limit: Option<&str>) -> Self {
    Self {
      page:  positive_or(page, DEFAULT_PAGE),
      limit: positive_or(limit, DEFAULT_LIMIT),
    }
  }

  pub fn offset(&self) -> usize {
    self.page.saturating_sub(1).saturating_mul(self.limit)
  }

  /// The slice of `items` this page covers; empty past the end.
  pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
    let start = self.offset().min(items.len());
    let end = start.saturating_add(self.limit).min(items.len());
    &items[start..end]
  }
}

/// Stable in-place sort of a filtered set.
pub fn sort(records: &mut [&SalesRecord], key: SortKey, order: SortOrder) {
  records.sort_by(|a, b| {
    let ord = key.compare(a, b);
    match order {
      SortOrder::Asc => ord,
      SortOrder::Desc => ord.reverse(),
    }
  });
}

/// Parse the leading integer of `raw` (sign, then digits; trailing junk is
/// ignored) and fall back to `default` unless the result is positive.
fn positive_or(raw: Option<&str>, default: usize) -> usize {
  raw
    .and_then(leading_int)
    .and_then(|n| usize::try_from(n).ok())
    .filter(|n| *n > 0)
    .unwrap_or(default)
}

fn leading_int(raw: &str) -> Option<i64> {
  let raw = raw.trim_start();
  let (negative, rest) = match raw.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, raw.strip_prefix('+').unwrap_or(raw)),
  };
  let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
  if digits == 0 {
    return None;
  }
  let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
  Some(if negative { -value } else { value })
}
