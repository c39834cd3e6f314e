//! Photo domain entity
//!
//! Photos are owned by the external photo store. The engine reads them to
//! decide contest eligibility and otherwise holds them by id only; it never
//! mutates a photo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a photo
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PhotoId(pub Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PhotoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A photo in the user's library.
///
/// Display fields beyond `id` and `rating` are opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub name: String,
    /// Star rating assigned by the user, if any. Contest eligibility is
    /// decided by the engine against this value.
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_id_display() {
        let id = PhotoId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn photo_id_ordering_is_stable() {
        let a = PhotoId(Uuid::from_u128(1));
        let b = PhotoId(Uuid::from_u128(2));
        assert!(a < b);
    }

    #[test]
    fn photo_serde_round_trip() {
        let photo = Photo {
            id: PhotoId::new(),
            name: "sunset.jpg".to_string(),
            rating: Some(5),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&photo).unwrap();
        let back: Photo = serde_json::from_value(json).unwrap();
        assert_eq!(back, photo);
    }
}
