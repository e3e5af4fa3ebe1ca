//! Configuration
//!
//! Settings are read from an optional TOML file under the user's config
//! directory, then overridden by environment variables. A missing file is
//! not an error; everything has a sensible localhost default.
//!
//! # File Location
//!
//! `$XDG_CONFIG_HOME/nova/config.toml` (or the platform equivalent).
//!
//! # Environment Variables
//!
//! - `NOVA_BACKEND_URL`: assistant backend base URL
//! - `NOVA_RELAY_ADDR`: relay listen address
//! - `NOVA_RELAY_URL`: relay base URL as seen by clients

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Assistant backend settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the assistant backend
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Relay daemon settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address the relay listens on
    pub listen_addr: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Client-side settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Relay base URL the chat client talks to
    pub relay_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Complete configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovaConfig {
    /// Assistant backend settings
    pub backend: BackendConfig,
    /// Relay daemon settings
    pub relay: RelayConfig,
    /// Client-side settings
    pub client: ClientConfig,
}

impl NovaConfig {
    /// Apply environment-variable overrides on top of the loaded values
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("NOVA_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(addr) = std::env::var("NOVA_RELAY_ADDR") {
            self.relay.listen_addr = addr;
        }
        if let Ok(url) = std::env::var("NOVA_RELAY_URL") {
            self.client.relay_url = url;
        }
        self
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`NovaConfig`]
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Default config file location, when a config directory exists
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nova").join("config.toml"))
}

/// Load configuration from the default location with env overrides.
///
/// A missing file falls back to defaults; only an unreadable or
/// unparseable file is an error.
pub fn load_config() -> Result<NovaConfig, ConfigError> {
    let config = match default_config_path() {
        Some(path) if path.exists() => load_config_from_path(&path)?,
        _ => NovaConfig::default(),
    };
    Ok(config.with_env_overrides())
}

/// Load configuration from a specific file, without env overrides
pub fn load_config_from_path(path: &Path) -> Result<NovaConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = NovaConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.relay.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.client.relay_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[backend]").unwrap();
        writeln!(file, "base_url = \"http://ai.internal:9000\"").unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://ai.internal:9000");
        // Unlisted sections keep their defaults
        assert_eq!(config.relay.listen_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "backend = \"not a table\"").unwrap();

        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config_from_path(Path::new("/nonexistent/nova.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
