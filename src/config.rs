use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev";
const STORE_FILE_NAME: &str = "store.json";

static DEFAULT_DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordscope")
});

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the dictionary service, without a trailing path.
    pub api_base: String,
    pub data_dir: PathBuf,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: DEFAULT_DATA_DIR.clone(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    pub fn entries_url(&self) -> String {
        format!("{}/api/v2/entries/en/", self.api_base.trim_end_matches('/'))
    }
}
