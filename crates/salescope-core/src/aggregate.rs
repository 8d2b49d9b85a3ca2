//! KPI and insight computation over a filtered record set.
//!
//! Both entry points are pure functions of their inputs; the caller decides
//! which snapshot and criteria they run against.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::{filter::in_range, record::SalesRecord};

// ─── KPIs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
  pub total_sales:  f64,
  pub total_profit: f64,
  pub orders:       usize,
  /// Fractional change against the preceding period of equal length.
  pub growth:       f64,
}

/// Totals over `filtered`, plus growth against the window immediately before
/// `[start, end]`.
///
/// The baseline window is taken from the whole of `all`, with no region or
/// product constraint, whatever narrowed `filtered`.
pub fn kpis(
  filtered: &[&SalesRecord],
  all: &[SalesRecord],
  start: Option<NaiveDate>,
  end: Option<NaiveDate>,
) -> Kpis {
  let total_sales: f64 = filtered.iter().map(|r| r.sales).sum();
  let total_profit: f64 = filtered.iter().map(|r| r.profit).sum();

  let growth = match (start, end) {
    (Some(start), Some(end)) => {
      let previous: f64 = match previous_period(start, end) {
        Some((prev_start, prev_end)) => all
          .iter()
          .filter(|r| in_range(r.date, Some(prev_start), Some(prev_end)))
          .map(|r| r.sales)
          .sum(),
        None => 0.0,
      };
      growth(total_sales, previous)
    }
    _ => 0.0,
  };

  Kpis {
    total_sales,
    total_profit,
    orders: filtered.len(),
    growth,
  }
}

/// The equal-length window ending the day before `start`.
///
/// `None` when the range is inverted or the window would fall before the
/// earliest representable date; either way the baseline is empty.
pub fn previous_period(
  start: NaiveDate,
  end: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
  let span = u64::try_from((end - start).num_days()).ok()?;
  let prev_start = start.checked_sub_days(Days::new(span.checked_add(1)?))?;
  let prev_end = start.pred_opt()?;
  Some((prev_start, prev_end))
}

/// `(current - previous) / previous`. A zero baseline yields `0.0` when
/// current is also zero and the sentinel `1.0` otherwise.
pub fn growth(current: f64, previous: f64) -> f64 {
  if previous != 0.0 {
    (current - previous) / previous
  } else if current == 0.0 {
    0.0
  } else {
    1.0
  }
}

// ─── Insights ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRegion {
  pub region: String,
  pub sales:  f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
  pub product: String,
  pub sales:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
  pub top_region:  Option<TopRegion>,
  pub top_product: Option<TopProduct>,
  pub avg_order:   f64,
}

pub fn insights(filtered: &[&SalesRecord]) -> Insights {
  let top_region = leader(filtered, |r| &r.region)
    .map(|(region, sales)| TopRegion { region, sales });
  let top_product = leader(filtered, |r| &r.product)
    .map(|(product, sales)| TopProduct { product, sales });

  let avg_order = if filtered.is_empty() {
    0.0
  } else {
    filtered.iter().map(|r| r.sales).sum::<f64>() / filtered.len() as f64
  };

  Insights {
    top_region,
    top_product,
    avg_order,
  }
}

/// Group by `key` summing sales, then pick the largest group. Groups keep the
/// order of their first occurrence and only a strictly larger sum displaces
/// the current leader, so ties go to the earliest group.
fn leader<'a, F>(records: &[&'a SalesRecord], key: F) -> Option<(String, f64)>
where
  F: Fn(&'a SalesRecord) -> &'a String,
{
  let mut groups: Vec<(&'a String, f64)> = Vec::new();
  for &record in records {
    let name = key(record);
    match groups.iter_mut().find(|(g, _)| *g == name) {
      Some((_, sum)) => *sum += record.sales,
      None => groups.push((name, record.sales)),
    }
  }

  let mut best: Option<(&String, f64)> = None;
  for (name, sum) in groups {
    if best.is_none_or(|(_, top)| sum > top) {
      best = Some((name, sum));
    }
  }
  best.map(|(name, sum)| (name.clone(), sum))
}
