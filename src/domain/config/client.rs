use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_USER_ID: &str = "guest";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    #[serde(rename = "getFiles")]
    pub get_files: String,
    #[serde(rename = "uploadFile")]
    pub upload_file: String,
    #[serde(rename = "downloadFile")]
    pub download_file: String,
    #[serde(rename = "getHistory")]
    pub get_history: String,
}

impl ApiEndpoints {
    pub fn with_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            get_files: format!("{}/files", base),
            upload_file: format!("{}/upload", base),
            download_file: format!("{}/download", base),
            get_history: format!("{}/history", base),
        }
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::with_base(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoints: ApiEndpoints,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
    #[serde(rename = "connectTimeoutSecs")]
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::default(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Reads `FILEHUB_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let url = |name: &'static str, default: String| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
                Some(value) => Ok(value.trim().to_string()),
                None => Ok(default),
            }
        };

        let seconds = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber { name, value }),
                None => Ok(default),
            }
        };

        let endpoints = ApiEndpoints {
            get_files: url("FILEHUB_FILES_URL", defaults.endpoints.get_files)?,
            upload_file: url("FILEHUB_UPLOAD_URL", defaults.endpoints.upload_file)?,
            download_file: url("FILEHUB_DOWNLOAD_URL", defaults.endpoints.download_file)?,
            get_history: url("FILEHUB_HISTORY_URL", defaults.endpoints.get_history)?,
        };

        Ok(Self {
            endpoints,
            user_id: url("FILEHUB_USER_ID", defaults.user_id)?,
            timeout_secs: seconds("FILEHUB_TIMEOUT_SECS", defaults.timeout_secs)?,
            connect_timeout_secs: seconds(
                "FILEHUB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
