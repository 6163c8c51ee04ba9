//! Application error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by application entry points.
///
/// The two variants correspond to the two failure exit codes: a
/// [`Fatal`](AppError::Fatal) error is user-correctable and reported
/// as a single message line (exit code 1), while an
/// [`Unexpected`](AppError::Unexpected) error is reported with its
/// full source chain (exit code 2).
#[derive(Error, Debug)]
pub enum AppError {
    /// User-correctable failure; only the message is reported.
    #[error("{0}")]
    Fatal(String),

    /// Anything else; reported with full diagnostic detail.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    /// Creates a fatal error with the given message.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Fatal(err.to_string())
    }
}

/// Result type for application entry points.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_displays_message_only() {
        let err = AppError::fatal("bad input");
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn test_config_error_becomes_fatal() {
        let err: AppError = ConfigError::InvalidOverride("nonsense".into()).into();
        assert!(matches!(err, AppError::Fatal(_)));
        assert_eq!(err.to_string(), "config override \"nonsense\" invalid");
    }

    #[test]
    fn test_anyhow_becomes_unexpected() {
        let err: AppError = anyhow::anyhow!("wires crossed").into();
        assert!(matches!(err, AppError::Unexpected(_)));
    }
}
