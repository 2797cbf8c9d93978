//! Core types and catalog logic for the Prospect product-evaluation tracker.
//!
//! This crate is deliberately free of I/O dependencies. It owns the record
//! model, input validation, the sorted view, and the [`store::SnapshotStore`]
//! seam that storage backends (e.g. `prospect-store-file`) implement.

pub mod catalog;
pub mod error;
pub mod input;
pub mod record;
pub mod sort;
pub mod store;

pub use catalog::{Catalog, SNAPSHOT_KEY};
pub use error::{Error, Result};
