//! Error types for the Rehearse application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Rehearse application.
///
/// Every variant is scoped to a single request. None of them is fatal to the
/// process; the transport decides how to surface each one to the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RehearseError {
    /// Empty or missing required input. Nothing was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A candidate turn arrived after the interview ended.
    #[error("Interview has ended or session is invalid. Start a new interview.")]
    SessionInactive,

    /// The external model call failed.
    #[error("Model unavailable: {message}")]
    ModelUnavailable {
        message: String,
        retryable: bool,
        retry_after_secs: Option<u64>,
    },

    /// The interview cannot start (or continue) because setup is not finished.
    #[error("Setup incomplete: missing {missing}")]
    SetupIncomplete { missing: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data access error (session store)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RehearseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a SetupIncomplete error naming the missing field
    pub fn setup_incomplete(missing: impl Into<String>) -> Self {
        Self::SetupIncomplete {
            missing: missing.into(),
        }
    }

    /// Creates a retryable ModelUnavailable error
    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            message: message.into(),
            retryable: true,
            retry_after_secs: None,
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a SessionInactive error
    pub fn is_session_inactive(&self) -> bool {
        matches!(self, Self::SessionInactive)
    }

    /// Check if this is a ModelUnavailable error
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }

    /// Check if this is a SetupIncomplete error
    pub fn is_setup_incomplete(&self) -> bool {
        matches!(self, Self::SetupIncomplete { .. })
    }

    /// Whether the caller may simply try the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { retryable: true, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RehearseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RehearseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RehearseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RehearseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for RehearseError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RehearseError>`.
pub type Result<T> = std::result::Result<T, RehearseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_model_errors_are_retryable() {
        assert!(RehearseError::model_unavailable("timeout").is_retryable());
        assert!(!RehearseError::validation("empty").is_retryable());
        assert!(!RehearseError::SessionInactive.is_retryable());
        assert!(!RehearseError::setup_incomplete("role").is_retryable());

        let permanent = RehearseError::ModelUnavailable {
            message: "bad request".to_string(),
            retryable: false,
            retry_after_secs: None,
        };
        assert!(permanent.is_model_unavailable());
        assert!(!permanent.is_retryable());
    }

    #[test]
    fn test_setup_incomplete_names_missing_field() {
        let err = RehearseError::setup_incomplete("interview_type");
        assert!(err.is_setup_incomplete());
        assert_eq!(err.to_string(), "Setup incomplete: missing interview_type");
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RehearseError = io.into();
        match err {
            RehearseError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let err: RehearseError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RehearseError::Serialization { ref format, .. } if format == "JSON"));
    }
}
