//! Photo library read from a JSON file
//!
//! The engine never owns the photo collection; this adapter reads a JSON
//! array of photos maintained elsewhere. Each `list` call re-reads the file,
//! so deletions made between sessions are visible to reconciliation.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::entities::Photo;
use crate::domain::ports::PhotoStore;
use crate::error::DomainError;

pub struct JsonPhotoStore {
    path: PathBuf,
}

impl JsonPhotoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PhotoStore for JsonPhotoStore {
    async fn list(&self) -> Result<Vec<Photo>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DomainError::NotFound(format!(
                    "photo library {}",
                    self.path.display()
                )))
            }
            Err(err) => {
                return Err(DomainError::Storage(format!(
                    "{}: {err}",
                    self.path.display()
                )))
            }
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_photo;

    #[tokio::test]
    async fn missing_library_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPhotoStore::new(dir.path().join("photos.json"));
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn reads_the_library_fresh_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.json");
        let store = JsonPhotoStore::new(&path);

        let mut photos = vec![test_photo("a"), test_photo("b")];
        std::fs::write(&path, serde_json::to_vec(&photos).unwrap()).unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);

        // A deletion in the library shows up on the next read.
        photos.pop();
        std::fs::write(&path, serde_json::to_vec(&photos).unwrap()).unwrap();
        assert_eq!(store.list().await.unwrap(), photos);
    }

    #[tokio::test]
    async fn malformed_library_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.json");
        std::fs::write(&path, b"[{").unwrap();

        let store = JsonPhotoStore::new(&path);
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }
}
