//! Synthetic sales data.
//!
//! Each generated day holds between [`MIN_PER_DAY`] and [`MAX_PER_DAY`]
//! records. Sales are skewed upward by a second multiplicative draw, and
//! profit is a random margin of sales.

use chrono::{Days, Local, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
  Error, Result,
  record::{DEFAULT_PRODUCTS, DEFAULT_REGIONS, SalesRecord},
};

pub const DEFAULT_DAYS: u32 = 120;
/// A century of history.
pub const MAX_DAYS: u32 = 36_525;
pub const MIN_PER_DAY: u32 = 4;
pub const MAX_PER_DAY: u32 = 9;

const BASE_SALES: std::ops::Range<f64> = 200.0..1700.0;
const SKEW: std::ops::Range<f64> = 1.0..1.5;
const MARGIN: std::ops::Range<f64> = 0.08..0.38;

/// Inputs to a [`Generator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  /// Number of consecutive days, ending on `end_date`.
  pub days:     u32,
  pub regions:  Vec<String>,
  pub products: Vec<String>,
  /// Fixes the RNG for reproducible datasets. `None` seeds from the OS.
  pub seed:     Option<u64>,
  /// Last generated day. `None` means "today" at generation time.
  pub end_date: Option<NaiveDate>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      days:     DEFAULT_DAYS,
      regions:  DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
      products: DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect(),
      seed:     None,
      end_date: None,
    }
  }
}

/// A validated generator that owns its RNG.
///
/// The RNG persists across calls, so a seeded generator yields a fresh draw
/// on every call while the whole series stays reproducible.
#[derive(Debug)]
pub struct Generator {
  days:     u32,
  regions:  Vec<String>,
  products: Vec<String>,
  end_date: Option<NaiveDate>,
  rng:      StdRng,
}

impl Generator {
  pub fn new(config: GeneratorConfig) -> Result<Self> {
    if config.days == 0 {
      return Err(Error::NoDays);
    }
    if config.days > MAX_DAYS {
      return Err(Error::TooManyDays(config.days));
    }
    if config.regions.is_empty() {
      return Err(Error::EmptyCatalog("region"));
    }
    if config.products.is_empty() {
      return Err(Error::EmptyCatalog("product"));
    }
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };
    Ok(Self {
      days: config.days,
      regions: config.regions,
      products: config.products,
      end_date: config.end_date,
      rng,
    })
  }

  /// Produce a complete new dataset.
  pub fn generate(&mut self) -> Vec<SalesRecord> {
    let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
    generate(
      &mut self.rng,
      self.days,
      end,
      &self.regions,
      &self.products,
    )
  }
}

/// Generate `day_count` days of records ending on `end`, oldest day first.
///
/// Ids start at 1 and follow generation order. `regions` and `products` must
/// be non-empty. Days that would fall before the earliest representable date
/// are skipped.
pub fn generate<R: Rng>(
  rng: &mut R,
  day_count: u32,
  end: NaiveDate,
  regions: &[String],
  products: &[String],
) -> Vec<SalesRecord> {
  let mut records = Vec::new();
  let mut next_id = 1;

  for back in (0..day_count).rev() {
    let Some(date) = end.checked_sub_days(Days::new(u64::from(back))) else {
      continue;
    };
    let count = rng.random_range(MIN_PER_DAY..=MAX_PER_DAY);
    for _ in 0..count {
      let region = &regions[rng.random_range(0..regions.len())];
      let product = &products[rng.random_range(0..products.len())];
      let sales =
        (rng.random_range(BASE_SALES) * rng.random_range(SKEW)).round();
      let profit = (sales * rng.random_range(MARGIN)).round();
      records.push(SalesRecord::new(
        next_id,
        date,
        region.as_str(),
        product.as_str(),
        sales,
        profit,
      ));
      next_id += 1;
    }
  }

  records
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn pinned(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
      days: 10,
      seed: Some(seed),
      end_date: Some(day(2025, 3, 10)),
      ..GeneratorConfig::default()
    }
  }

  #[test]
  fn covers_consecutive_days_ending_on_end_date() {
    let records = Generator::new(pinned(1)).unwrap().generate();
    assert_eq!(records.first().unwrap().date, day(2025, 3, 1));
    assert_eq!(records.last().unwrap().date, day(2025, 3, 10));
    assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
  }

  #[test]
  fn per_day_counts_stay_in_range() {
    let records = Generator::new(pinned(2)).unwrap().generate();
    let mut counts = std::collections::BTreeMap::new();
    for r in &records {
      *counts.entry(r.date).or_insert(0u32) += 1;
    }
    assert_eq!(counts.len(), 10);
    assert!(
      counts
        .values()
        .all(|c| (MIN_PER_DAY..=MAX_PER_DAY).contains(c))
    );
  }

  #[test]
  fn amounts_follow_distribution() {
    let records = Generator::new(pinned(3)).unwrap().generate();
    for r in &records {
      assert!(r.sales >= 200.0 && r.sales <= 2550.0, "sales {}", r.sales);
      assert_eq!(r.sales.fract(), 0.0);
      assert_eq!(r.profit.fract(), 0.0);
      assert!(r.profit >= (r.sales * 0.08).floor());
      assert!(r.profit <= (r.sales * 0.38).ceil());
      assert!(DEFAULT_REGIONS.contains(&r.region.as_str()));
      assert!(DEFAULT_PRODUCTS.contains(&r.product.as_str()));
    }
  }

  #[test]
  fn same_seed_reproduces_dataset() {
    let a = Generator::new(pinned(42)).unwrap().generate();
    let b = Generator::new(pinned(42)).unwrap().generate();
    assert_eq!(a, b);
  }

  #[test]
  fn successive_draws_differ() {
    let mut generator = Generator::new(pinned(42)).unwrap();
    let first = generator.generate();
    let second = generator.generate();
    assert_ne!(first, second);
  }

  #[test]
  fn rejects_days_beyond_limit() {
    let config = GeneratorConfig {
      days: MAX_DAYS + 1,
      ..GeneratorConfig::default()
    };
    assert!(matches!(
      Generator::new(config),
      Err(Error::TooManyDays(d)) if d == MAX_DAYS + 1
    ));

    let config = GeneratorConfig {
      days: u32::MAX,
      ..GeneratorConfig::default()
    };
    assert!(Generator::new(config).is_err());
  }

  #[test]
  fn stops_at_earliest_representable_date() {
    let mut rng = StdRng::seed_from_u64(9);
    let regions = vec!["North".to_string()];
    let products = vec!["Phone".to_string()];
    let records = generate(&mut rng, 5, NaiveDate::MIN, &regions, &products);
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.date == NaiveDate::MIN));
    assert_eq!(records.first().unwrap().id, 1);
  }

  #[test]
  fn rejects_empty_inputs() {
    let no_days = GeneratorConfig { days: 0, ..GeneratorConfig::default() };
    assert!(matches!(Generator::new(no_days), Err(Error::NoDays)));

    let no_regions = GeneratorConfig {
      regions: vec![],
      ..GeneratorConfig::default()
    };
    assert!(matches!(
      Generator::new(no_regions),
      Err(Error::EmptyCatalog("region"))
    ));

    let no_products = GeneratorConfig {
      products: vec![],
      ..GeneratorConfig::default()
    };
    assert!(matches!(
      Generator::new(no_products),
      Err(Error::EmptyCatalog("product"))
    ));
  }
}
