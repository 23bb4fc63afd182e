//! Application configuration.
//!
//! Contains the settings for where credentials live and what the session
//! bootstrap forwards to the backends.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Session-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Push notification token forwarded on sign-in.
    #[serde(default)]
    pub push_token: Option<String>,

    /// Credential database file name, relative to the data directory.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            push_token: None,
            credentials_file: default_credentials_file(),
        }
    }
}

fn default_credentials_file() -> String {
    "credentials.db".to_string()
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".workspace-session")
    }

    /// Get the credential database path.
    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir().join(&self.session.credentials_file)
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }
}
