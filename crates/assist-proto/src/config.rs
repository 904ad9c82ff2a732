use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::model::DEFAULT_NESTED_GENRE_KEY;
use super::platform;
use super::request::Endpoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Where the organize service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_playlist_path")]
    pub playlist_path: String,
    #[serde(default = "default_text_path")]
    pub text_path: String,
    /// Unset means wait forever, like the browser fetch this replaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Genre key whose entry holds `(sub-genre, songs)` pairs.
    #[serde(default = "default_nested_genre_key")]
    pub nested_genre_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_accepted_media_type")]
    pub accepted_media_type: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            playlist_path: default_playlist_path(),
            text_path: default_text_path(),
            request_timeout_secs: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            nested_genre_key: default_nested_genre_key(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_media_type: default_accepted_media_type(),
        }
    }
}

impl BackendConfig {
    pub fn path_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Playlist => &self.playlist_path,
            Endpoint::Text => &self.text_path,
        }
    }

    /// Full URL for an endpoint; tolerates a trailing slash on `base_url`.
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path_for(endpoint);
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    // Flask's development server default.
    "http://127.0.0.1:5000".to_string()
}

fn default_playlist_path() -> String {
    Endpoint::Playlist.default_path().to_string()
}

fn default_text_path() -> String {
    Endpoint::Text.default_path().to_string()
}

fn default_nested_genre_key() -> String {
    DEFAULT_NESTED_GENRE_KEY.to_string()
}

fn default_accepted_media_type() -> String {
    "text/plain".to_string()
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            display: DisplayConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}
