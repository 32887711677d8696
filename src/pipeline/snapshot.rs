// src/pipeline/snapshot.rs

//! Snapshot replacement write routine.
//!
//! The store must end up holding exactly the new batch: every prior key is
//! deleted before any insert happens. The two phases are not wrapped in a
//! transaction (the backing stores offer none), so a failure mid-insert
//! leaves whatever was inserted so far and nothing from the old batch. A
//! failure during delete aborts before the first insert.

use crate::error::Result;
use crate::models::EarthquakeRecord;
use crate::storage::{DELETE_BATCH_SIZE, SnapshotStore};

/// Replace the store contents with exactly the given records.
///
/// Returns the number of stale records deleted.
pub async fn replace_all(
    store: &dyn SnapshotStore,
    records: &[EarthquakeRecord],
) -> Result<usize> {
    let stale_keys = store.scan_keys().await?;
    for chunk in stale_keys.chunks(DELETE_BATCH_SIZE) {
        store.delete_batch(chunk).await?;
    }

    for record in records {
        store.put(record).await?;
    }

    Ok(stale_keys.len())
}
