use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{Photo, PhotoId};
use crate::domain::ports::{ConfirmPrompt, PhotoStore, StateStore};
use crate::error::DomainError;

/// Photo collection backed by a vec. Mutable mid-test so reconciliation
/// against a drifting library can be exercised.
#[derive(Default)]
pub struct InMemoryPhotoStore {
    photos: RwLock<Vec<Photo>>,
}

impl InMemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photo(self, photo: Photo) -> Self {
        self.photos.write().unwrap().push(photo);
        self
    }

    pub fn remove(&self, id: PhotoId) {
        self.photos.write().unwrap().retain(|p| p.id != id);
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn list(&self) -> Result<Vec<Photo>, DomainError> {
        Ok(self.photos.read().unwrap().clone())
    }
}

/// Blob store over a hash map, with injectable save failures.
#[derive(Default)]
pub struct InMemoryStateStore {
    blobs: RwLock<HashMap<String, Value>>,
    fail_saves: AtomicBool,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every save fails until unset. Loads still succeed.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self, namespace: &str) -> Option<Value> {
        self.blobs.read().unwrap().get(namespace).cloned()
    }

    /// Seed a blob directly, bypassing the engine's serializer.
    pub fn put(&self, namespace: &str, blob: Value) {
        self.blobs
            .write()
            .unwrap()
            .insert(namespace.to_string(), blob);
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self, namespace: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.blobs.read().unwrap().get(namespace).cloned())
    }

    async fn save(&self, namespace: &str, blob: Value) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("injected save failure".to_string()));
        }
        self.blobs
            .write()
            .unwrap()
            .insert(namespace.to_string(), blob);
        Ok(())
    }

    async fn clear(&self, namespace: &str) -> Result<(), DomainError> {
        self.blobs.write().unwrap().remove(namespace);
        Ok(())
    }
}

/// Prompt that always answers yes.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}
