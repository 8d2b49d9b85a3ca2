//! The `RecordStore` trait and its in-memory implementation.
//!
//! Higher layers (`salescope-api`) depend on the trait, so tests and
//! alternative backends can be injected without shared process state.

use std::{
  collections::BTreeSet,
  sync::{Arc, Mutex, RwLock},
};

use crate::{
  Error, Result,
  generate::{Generator, GeneratorConfig},
  record::SalesRecord,
};

/// An immutable, shared view of the whole dataset at one point in time.
pub type Snapshot = Arc<[SalesRecord]>;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the owner of the sales dataset.
///
/// The dataset is replaced wholesale by [`RecordStore::reload`]; there is no
/// per-record mutation. A caller that takes one [`Snapshot`] per request
/// never observes a half-replaced dataset.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the current dataset.
  fn snapshot(&self) -> Result<Snapshot, Self::Error>;

  /// Discard the current dataset and generate a new one. Returns its size.
  fn reload(&self) -> Result<usize, Self::Error>;

  /// Distinct regions present in the current dataset, sorted.
  fn distinct_regions(&self) -> Result<Vec<String>, Self::Error> {
    Ok(distinct(&self.snapshot()?, |r| &r.region))
  }

  /// Distinct products present in the current dataset, sorted.
  fn distinct_products(&self) -> Result<Vec<String>, Self::Error> {
    Ok(distinct(&self.snapshot()?, |r| &r.product))
  }
}

/// Sorted, de-duplicated values of one string field.
pub fn distinct<'a, F>(records: &'a [SalesRecord], field: F) -> Vec<String>
where
  F: Fn(&'a SalesRecord) -> &'a String,
{
  records
    .iter()
    .map(field)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .cloned()
    .collect()
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// The process-lifetime store: a generated dataset behind a swappable `Arc`.
///
/// Reads clone the `Arc` under a short read lock. Reload generates outside
/// the data lock and swaps under a short write lock; the generator mutex
/// serialises concurrent reloads.
#[derive(Debug)]
pub struct MemoryStore {
  records:   RwLock<Snapshot>,
  generator: Mutex<Generator>,
}

impl MemoryStore {
  /// Build a store and populate it with a first generated dataset.
  pub fn new(config: GeneratorConfig) -> Result<Self> {
    let mut generator = Generator::new(config)?;
    let records = generator.generate();
    tracing::debug!(total = records.len(), "generated initial dataset");
    Ok(Self {
      records:   RwLock::new(records.into()),
      generator: Mutex::new(generator),
    })
  }

  /// Build a store over a fixed dataset. `reload` still regenerates from
  /// `config`.
  pub fn from_records(
    records: Vec<SalesRecord>,
    config: GeneratorConfig,
  ) -> Result<Self> {
    Ok(Self {
      records:   RwLock::new(records.into()),
      generator: Mutex::new(Generator::new(config)?),
    })
  }
}

impl RecordStore for MemoryStore {
  type Error = Error;

  fn snapshot(&self) -> Result<Snapshot> {
    let guard = self.records.read().map_err(|_| Error::Poisoned)?;
    Ok(Arc::clone(&guard))
  }

  fn reload(&self) -> Result<usize> {
    let mut generator = self.generator.lock().map_err(|_| Error::Poisoned)?;
    let fresh: Snapshot = generator.generate().into();
    let total = fresh.len();
    *self.records.write().map_err(|_| Error::Poisoned)? = fresh;
    Ok(total)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn config(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
      days: 5,
      seed: Some(seed),
      end_date: NaiveDate::from_ymd_opt(2025, 6, 30),
      ..GeneratorConfig::default()
    }
  }

  fn record(id: u64, region: &str, product: &str) -> SalesRecord {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    SalesRecord::new(id, date, region, product, 10.0, 1.0)
  }

  #[test]
  fn distinct_values_are_sorted_and_unique() {
    let store = MemoryStore::from_records(
      vec![
        record(1, "West", "Phone"),
        record(2, "East", "Laptop"),
        record(3, "West", "Laptop"),
      ],
      config(1),
    )
    .unwrap();
    assert_eq!(store.distinct_regions().unwrap(), vec!["East", "West"]);
    assert_eq!(store.distinct_products().unwrap(), vec!["Laptop", "Phone"]);
  }

  #[test]
  fn reload_replaces_dataset_and_reports_size() {
    let store = MemoryStore::from_records(vec![record(1, "X", "Y")], config(9))
      .unwrap();
    let before = store.snapshot().unwrap();

    let total = store.reload().unwrap();
    let after = store.snapshot().unwrap();

    assert_eq!(after.len(), total);
    assert!(total >= 5 * 4);
    assert_eq!(before.len(), 1, "old snapshot is untouched");
    assert_eq!(after.first().unwrap().id, 1);
  }

  #[test]
  fn concurrent_readers_see_whole_datasets() {
    let store = Arc::new(MemoryStore::new(config(3)).unwrap());
    let readers: Vec<_> = (0..4)
      .map(|_| {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
          for _ in 0..50 {
            let snap = store.snapshot().unwrap();
            let ids: Vec<u64> = snap.iter().map(|r| r.id).collect();
            let expected: Vec<u64> = (1..=snap.len() as u64).collect();
            assert_eq!(ids, expected);
          }
        })
      })
      .collect();
    for _ in 0..20 {
      store.reload().unwrap();
    }
    for r in readers {
      r.join().unwrap();
    }
  }
}
