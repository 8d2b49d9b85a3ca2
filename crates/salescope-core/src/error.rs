//! Error types for `salescope-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("generator needs at least one {0}")]
  EmptyCatalog(&'static str),

  #[error("generator needs at least one day")]
  NoDays,

  #[error("generator days {0} exceeds the supported maximum")]
  TooManyDays(u32),

  #[error("record store lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
