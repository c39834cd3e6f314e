//! Blob store over a state directory
//!
//! One JSON file per namespace under a configurable directory. Saves write a
//! sibling temp file first and rename it into place, so a crash mid-write
//! never leaves a truncated blob behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::StateStore;
use crate::error::DomainError;

pub struct FsStateStore {
    dir: PathBuf,
}

impl FsStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

fn storage_err(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::Storage(format!("{}: {err}", path.display()))
}

#[async_trait]
impl StateStore for FsStateStore {
    async fn load(&self, namespace: &str) -> Result<Option<Value>, DomainError> {
        let path = self.blob_path(namespace);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_err(&path, err)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, namespace: &str, blob: Value) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| storage_err(&self.dir, err))?;

        let path = self.blob_path(namespace);
        let tmp = self.dir.join(format!("{namespace}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(&blob)?;

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|err| storage_err(&tmp, err))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|err| storage_err(&path, err))?;
        tracing::debug!(path = %path.display(), "state saved");
        Ok(())
    }

    async fn clear(&self, namespace: &str) -> Result<(), DomainError> {
        let path = self.blob_path(namespace);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(&path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn load_missing_namespace_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStateStore::new(dir.path());
        assert_eq!(store.load("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStateStore::new(dir.path().join("nested"));

        let blob = json!({ "phase": "qualifying", "version": 1 });
        store.save("contest", blob.clone()).await.unwrap();
        assert_eq!(store.load("contest").await.unwrap(), Some(blob));
    }

    #[tokio::test]
    async fn save_overwrites_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStateStore::new(dir.path());

        store.save("contest", json!({ "n": 1 })).await.unwrap();
        store.save("contest", json!({ "n": 2 })).await.unwrap();
        assert_eq!(store.load("contest").await.unwrap(), Some(json!({ "n": 2 })));
        // No temp file left behind.
        assert!(!dir.path().join("contest.json.tmp").exists());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStateStore::new(dir.path());

        store.save("contest", json!({})).await.unwrap();
        store.clear("contest").await.unwrap();
        store.clear("contest").await.unwrap();
        assert_eq!(store.load("contest").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("contest.json"), b"{not json").unwrap();
        let store = FsStateStore::new(dir.path());

        let err = store.load("contest").await.unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }
}
