use chrono::Utc;

use crate::domain::entities::{Photo, PhotoId};

/// A contest-eligible photo with a fresh id.
pub fn test_photo(name: &str) -> Photo {
    test_photo_with_rating(name, Some(5))
}

pub fn test_photo_with_rating(name: &str, rating: Option<u8>) -> Photo {
    Photo {
        id: PhotoId::new(),
        name: name.to_string(),
        rating,
        created_at: Utc::now(),
    }
}
