//! Pipeline entry point: fetch → extract → replace snapshot.

pub mod snapshot;

pub use snapshot::replace_all;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::EarthquakeRecord;
use crate::services::SourceReader;
use crate::storage::SnapshotStore;

/// Summary of one pipeline invocation.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Records persisted in this run, in batch order
    pub records: Vec<EarthquakeRecord>,
    /// Malformed source items skipped during extraction
    pub skipped: usize,
    /// Records from previous runs removed from the store
    pub deleted: usize,
}

/// Run one full invocation against the given source and store.
///
/// The write phase never starts when extraction yields nothing, so an
/// empty source leaves the store untouched.
pub async fn run_pipeline(
    source: &dyn SourceReader,
    store: &dyn SnapshotStore,
) -> Result<RunOutcome> {
    let fetched = source.fetch_batch().await?;
    if fetched.skipped > 0 {
        log::warn!("Skipped {} malformed source items", fetched.skipped);
    }
    if fetched.records.is_empty() {
        return Err(AppError::EmptyResult);
    }

    let records: Vec<EarthquakeRecord> = fetched
        .records
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(Uuid::new_v4().to_string(), i as u32 + 1))
        .collect();

    let deleted = replace_all(store, &records).await?;
    log::info!(
        "Snapshot replaced: {} stored, {} stale removed, {} skipped",
        records.len(),
        deleted,
        fetched.skipped
    );

    Ok(RunOutcome {
        records,
        skipped: fetched.skipped,
        deleted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use crate::pipeline::snapshot::tests::FakeStore;
    use crate::services::FetchOutcome;
    use async_trait::async_trait;

    struct FakeSource {
        records: Vec<RawRecord>,
        skipped: usize,
    }

    #[async_trait]
    impl SourceReader for FakeSource {
        async fn fetch_batch(&self) -> Result<FetchOutcome> {
            Ok(FetchOutcome {
                records: self.records.clone(),
                skipped: self.skipped,
            })
        }
    }

    fn raw(reference: &str) -> RawRecord {
        RawRecord {
            local_datetime: "26/08/2026 21:50:12".to_string(),
            reference_location: reference.to_string(),
            magnitude: "4.0".to_string(),
            depth: "40 km".to_string(),
            ..RawRecord::default()
        }
    }

    #[tokio::test]
    async fn test_run_assigns_fresh_ids_and_contiguous_sequence() {
        let source = FakeSource {
            records: vec![raw("Lima"), raw("Ica"), raw("Arequipa")],
            skipped: 1,
        };
        let store = FakeStore::default();

        let outcome = run_pipeline(&source, &store).await.unwrap();
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.skipped, 1);

        let sequences: Vec<u32> = outcome.records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(sequences, vec![1, 2, 3]);

        let mut ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_fetch_leaves_store_untouched() {
        let source = FakeSource {
            records: Vec::new(),
            skipped: 4,
        };
        let store = FakeStore::default();
        store.seed(&["stale-1", "stale-2"]);

        let err = run_pipeline(&source, &store).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResult));
        assert_eq!(store.keys(), vec!["stale-1", "stale-2"]);
    }

    #[tokio::test]
    async fn test_run_replaces_previous_snapshot() {
        let source = FakeSource {
            records: vec![raw("Lima"), raw("Ica")],
            skipped: 0,
        };
        let store = FakeStore::default();
        store.seed(&["old-a", "old-b", "old-c"]);

        let outcome = run_pipeline(&source, &store).await.unwrap();
        assert_eq!(outcome.deleted, 3);

        let mut expected: Vec<String> =
            outcome.records.iter().map(|r| r.id.clone()).collect();
        expected.sort();
        assert_eq!(store.keys(), expected);
    }
}
