//! File-backed storage for the Prospect catalog.
//!
//! [`FileStore`] implements [`prospect_core::store::SnapshotStore`] with one
//! file per key under a data directory — the local-storage analog for a
//! single-user desktop tool. [`ImageStore`] is the image collaborator: it
//! content-addresses preview images by SHA-256 and hands back the opaque
//! [`ImageRef`](prospect_core::record::ImageRef) that records carry.

mod images;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use images::ImageStore;
pub use store::{FileStore, MemoryStore};

#[cfg(test)]
mod tests;
