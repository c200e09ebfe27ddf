//! Configuration errors

use hux_core::HuxError;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] HuxError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
