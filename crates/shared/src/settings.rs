//! User settings and backend endpoint selection.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Backend used by release builds.
pub const RELEASE_BACKEND_URL: &str = "https://rayfield-backend.onrender.com";
/// Backend used by debug builds.
pub const DEBUG_BACKEND_URL: &str = "http://localhost:3000";

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Per-request timeout for upload and chat calls.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            dark_mode: false,
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Where requests go and how long they may take.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            request_timeout,
        })
    }

    /// The host is fixed per build mode and cannot be changed at runtime.
    pub fn for_build(settings: &AppSettings) -> Result<Self, SettingsError> {
        let base = if cfg!(debug_assertions) {
            DEBUG_BACKEND_URL
        } else {
            RELEASE_BACKEND_URL
        };
        Self::new(base, settings.request_timeout())
    }

    /// `endpoint("api/upload")` -> `{base}/api/upload`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("ai", "Rayfield Energy", "PermitDesk")
        .map(|proj| proj.config_dir().join("settings.json"))
}

pub fn load_from(path: &Path) -> Result<AppSettings, SettingsError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_to(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_vec_pretty(settings)?)?;
    Ok(())
}

/// Load settings from the platform config dir, falling back to defaults.
pub fn load_or_default() -> AppSettings {
    let Some(path) = config_path() else {
        tracing::warn!("no config directory available, using default settings");
        return AppSettings::default();
    };
    if !path.exists() {
        return AppSettings::default();
    }
    match load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("ignoring {}: {}", path.display(), e);
            AppSettings::default()
        }
    }
}
