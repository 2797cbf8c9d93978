//! Error types for `prospect-core`.
//!
//! Nothing here is fatal: validation and not-found errors abort the operation
//! before any state change, and a persistence error leaves the in-memory
//! catalog authoritative for the running session.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// An input field was missing or failed to parse. The operation was
  /// aborted before any state change.
  #[error("invalid value for field `{field}`: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("no product with id {0}")]
  NotFound(Uuid),

  /// The snapshot store rejected a write. The in-memory mutation has already
  /// been applied and is retained; durability is not guaranteed until the
  /// next successful persist.
  #[error("snapshot write failed: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A sort option string did not name one of the twelve supported
  /// field/direction combinations. This is a configuration error, never a
  /// silent no-op.
  #[error("unknown sort option: {0:?}")]
  UnknownSortOption(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
