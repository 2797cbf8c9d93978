//! The [`SnapshotStore`] trait — the persistence collaborator seam.
//!
//! The catalog persists the whole collection as one serialized snapshot after
//! every mutation. Backends (e.g. `prospect-store-file`) only see an opaque
//! string per key; encoding and decoding belong to the catalog.

/// A key-value store holding serialized snapshots.
///
/// All access is synchronous: mutations in this system run to completion one
/// at a time, so writes are naturally serialized and never overlap.
pub trait SnapshotStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`, or `None` if absent.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Write `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
