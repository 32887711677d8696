//! Snapshot store abstractions.
//!
//! The store holds exactly one batch: the records from the most recent
//! successful run. Replacement is delete-all-then-insert-all; there is no
//! transaction spanning the two phases, so a crash between them leaves the
//! store empty rather than rolled back. A single writer is assumed (the
//! scheduled trigger), not enforced.

pub mod local;

#[cfg(feature = "dynamodb")]
pub mod dynamo;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::EarthquakeRecord;

// Re-export for convenience
pub use local::LocalStore;

#[cfg(feature = "dynamodb")]
pub use dynamo::DynamoStore;

/// Keys deleted per grouped delete call (DynamoDB batch-write limit).
pub const DELETE_BATCH_SIZE: usize = 25;

/// Trait for keyed snapshot store backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Scan the full key set of the store.
    async fn scan_keys(&self) -> Result<Vec<String>>;

    /// Delete a group of records by key.
    ///
    /// Callers chunk keys to [`DELETE_BATCH_SIZE`].
    async fn delete_batch(&self, keys: &[String]) -> Result<()>;

    /// Insert one record, keyed by its id.
    async fn put(&self, record: &EarthquakeRecord) -> Result<()>;

    /// Number of records currently stored.
    async fn count(&self) -> Result<usize> {
        Ok(self.scan_keys().await?.len())
    }
}
