//! Core types and operations for the Salescope analytics service.
//!
//! This crate is deliberately free of HTTP dependencies. It owns the sales
//! record model, the [`store::RecordStore`] abstraction with its in-memory
//! implementation, and the pure query/aggregate functions the API layer
//! composes per request.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod generate;
pub mod query;
pub mod record;
pub mod store;

pub use error::{Error, Result};
