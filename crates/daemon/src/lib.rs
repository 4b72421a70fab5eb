//! Passdrop daemon: configuration, HTTP server and the countdown service

pub mod config;
pub mod server;

pub use config::{DaemonConfig, HttpConfig, StorageConfig};
pub use server::HttpServer;

/// Result type for daemon operations
pub type Result<T> = std::result::Result<T, DaemonError>;

/// Daemon error types
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("HTTP server error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] passdrop_core::CoreError),
}
