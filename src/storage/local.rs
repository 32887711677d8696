//! Local filesystem store implementation.
//!
//! One JSON file per record, named by key, under a flat directory. Used by
//! the CLI and in tests; Lambda deployments use `DynamoStore`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::EarthquakeRecord;
use crate::storage::SnapshotStore;

/// File-per-key store rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a new store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }

    fn key_of(path: &Path) -> Option<String> {
        if path.extension()? != "json" {
            return None;
        }
        Some(path.file_stem()?.to_string_lossy().into_owned())
    }
}

#[async_trait]
impl SnapshotStore for LocalStore {
    async fn scan_keys(&self) -> Result<Vec<String>> {
        let mut dir = match tokio::fs::read_dir(&self.root_dir).await {
            Ok(dir) => dir,
            // A store that was never written to scans as empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::write(e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(AppError::write)? {
            if let Some(key) = Self::key_of(&entry.path()) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn delete_batch(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            tokio::fs::remove_file(self.path(key))
                .await
                .map_err(|e| AppError::write(format!("delete {key}: {e}")))?;
        }
        Ok(())
    }

    async fn put(&self, record: &EarthquakeRecord) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir)
            .await
            .map_err(AppError::write)?;

        let bytes = serde_json::to_vec_pretty(record).map_err(AppError::write)?;
        let path = self.path(&record.id);
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::write(format!("put {}: {e}", record.id)))?;
        file.write_all(&bytes).await.map_err(AppError::write)?;
        file.flush().await.map_err(AppError::write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use tempfile::TempDir;

    fn record(id: &str, seq: u32) -> EarthquakeRecord {
        RawRecord {
            local_datetime: "26/08/2026 21:50:12".to_string(),
            reference_location: "Lima".to_string(),
            magnitude: "4.2".to_string(),
            depth: "52 km".to_string(),
            ..RawRecord::default()
        }
        .into_record(id.to_string(), seq)
    }

    #[tokio::test]
    async fn test_put_scan_delete_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.put(&record("a", 1)).await.unwrap();
        store.put(&record("b", 2)).await.unwrap();
        assert_eq!(store.scan_keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.count().await.unwrap(), 2);

        store.delete_batch(&["a".to_string()]).await.unwrap();
        assert_eq!(store.scan_keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_scan_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("never-written"));
        assert!(store.scan_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        store.put(&record("a", 1)).await.unwrap();

        let err = store
            .delete_batch(&["ghost".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Write(_)));
    }

    #[tokio::test]
    async fn test_put_round_trips_record_content() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let original = record("r1", 1);
        store.put(&original).await.unwrap();

        let bytes = std::fs::read(tmp.path().join("r1.json")).unwrap();
        let loaded: EarthquakeRecord = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(loaded, original);
    }
}
