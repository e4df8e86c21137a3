//! Session error types
//!
//! Errors raised by the key-value storage behind the session and preferences.

use thiserror::Error;

/// Errors that can occur while reading or writing session state
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored value could not be parsed
    #[error("Corrupt value under key `{key}`: {error}")]
    Corrupt { key: String, error: String },

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::Corrupt {
            key: "namikaUser".to_string(),
            error: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Corrupt value under key `namikaUser`: expected value"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
    }
}
