//! Client configuration
//!
//! Stored as JSON at `<config dir>/vephar/config.json`. A missing file means
//! defaults; a malformed one is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use vephar_rpc::{PageSize, TransportSettings, VepharClient};

use crate::error::{CoreError, CoreResult};

/// Default HTTP address of a local node.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Get the configuration directory path
fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vephar")
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Root URL of the node to talk to
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Page size selected when the listing opens
    pub default_page_size: PageSize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.as_secs(),
            default_page_size: PageSize::default(),
        }
    }
}

impl ClientConfig {
    /// `<config dir>/vephar/config.json`
    pub fn default_path() -> PathBuf {
        get_config_dir().join("config.json")
    }

    /// Load from [`default_path`](Self::default_path).
    pub async fn load() -> CoreResult<Self> {
        Self::load_from(&Self::default_path()).await
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub async fn load_from(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;

        serde_json::from_str(&content).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// Write to `path` as pretty JSON, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .map_err(|e| CoreError::ConfigError(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        fs::write(path, content)
            .await
            .map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Build a client for the configured node.
    pub fn connect(&self) -> CoreResult<VepharClient> {
        Ok(VepharClient::with_settings(
            self.base_url.clone(),
            self.transport_settings(),
        )?)
    }
}
