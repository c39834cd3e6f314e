use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    /// JSON file holding the photo library.
    pub library_path: PathBuf,
    /// Directory where contest state blobs are kept.
    pub state_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            library_path: env::var("PHOTODUEL_LIBRARY")
                .unwrap_or_else(|_| "photos.json".to_string())
                .into(),
            state_dir: env::var("PHOTODUEL_STATE_DIR")
                .unwrap_or_else(|_| ".photoduel".to_string())
                .into(),
        }
    }
}
