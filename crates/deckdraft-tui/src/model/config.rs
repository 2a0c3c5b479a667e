use std::path::PathBuf;

use deckdraft_core::DetailLevel;

/// Runtime configuration, resolved from CLI flags > env vars > config file >
/// defaults at startup.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Base URL of the extraction/generation service.
    pub server_url: String,
    /// Directory the presentation artifact is saved into.
    pub download_dir: PathBuf,
    /// Default extraction detail level.
    pub detail_level: DetailLevel,
    pub theme_name: String,
    /// Set when a setting changed this session and should be persisted.
    pub dirty: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            detail_level: DetailLevel::default(),
            theme_name: "hacker".to_string(),
            dirty: false,
        }
    }
}
