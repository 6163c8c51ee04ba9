//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration.
///
/// Every variant is user-correctable: the bootstrap reports the
/// message at error severity and exits with the fatal status.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly named config file does not exist.
    #[error("failed to read config file {0:?}")]
    NotFound(PathBuf),

    /// The config file exists but could not be read or parsed.
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: figment::Error,
    },

    /// The config file has an extension no enabled format feature handles.
    #[error("unsupported config file format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// An environment override does not fit the `PREFIX_SECTION__KEY` shape.
    #[error("environment override {0:?} invalid")]
    InvalidEnv(String),

    /// An override directive is missing its `:` or `=` separator.
    #[error("config override {0:?} invalid")]
    InvalidOverride(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
