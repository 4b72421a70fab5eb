//! Configuration management for the passdrop daemon

use crate::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Persisted entry document configuration
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Address to bind the HTTP server
    pub bind_addr: SocketAddr,

    /// Enable CORS for browser clients
    pub cors_enabled: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Storage configuration for the persisted entry document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the entry document
    pub data_dir: PathBuf,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid default bind addr"),
            cors_enabled: true,
            timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("passdrop"),
        }
    }
}

impl StorageConfig {
    /// Path of the persisted entry document
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join("entries.json")
    }
}

impl DaemonConfig {
    /// Load configuration from file, with `PASSDROP_*` environment
    /// variables layered on top
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("PASSDROP").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from environment variables only
    ///
    /// # Errors
    ///
    /// Returns an error if an override value fails to deserialize
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("PASSDROP").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = DaemonConfig::default();
        assert_eq!(config.http.bind_addr.port(), 8080);
        assert!(config.http.cors_enabled);
        assert!(config.storage.document_path().ends_with("entries.json"));
    }

    #[test]
    fn from_file_reads_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[http]\nbind_addr = \"0.0.0.0:9999\"\n[storage]\ndata_dir = \"/tmp/passdrop-test\"\n",
        )
        .unwrap();

        let config = DaemonConfig::from_file(&path).unwrap();
        assert_eq!(config.http.bind_addr.port(), 9999);
        assert_eq!(
            config.storage.document_path(),
            PathBuf::from("/tmp/passdrop-test/entries.json")
        );
        // Unspecified fields keep their defaults
        assert_eq!(config.http.timeout_secs, 30);
    }
}
