//! Generative model client interface.
//!
//! The model is stateless across calls: every interviewer turn resends the
//! persona instruction and the whole replay history.

use crate::error::RehearseError;
use crate::session::ReplayMessage;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a model client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The request reached the service (or tried to) and failed.
    #[error("{message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The service answered, but without usable text.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The request could not be built.
    #[error("Invalid model request: {0}")]
    InvalidRequest(String),
}

impl ModelError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::ProcessError { is_retryable, .. } => *is_retryable,
            ModelError::MalformedResponse(_) => true,
            ModelError::InvalidRequest(_) => false,
        }
    }
}

impl From<ModelError> for RehearseError {
    fn from(err: ModelError) -> Self {
        let retryable = err.is_retryable();
        let retry_after_secs = match &err {
            ModelError::ProcessError { retry_after, .. } => retry_after.map(|d| d.as_secs()),
            _ => None,
        };
        RehearseError::ModelUnavailable {
            message: err.to_string(),
            retryable,
            retry_after_secs,
        }
    }
}

/// Contract for the external generative model.
#[async_trait]
pub trait InterviewModel: Send + Sync {
    /// Produces the next turn of a conversation.
    ///
    /// # Arguments
    ///
    /// * `system_instruction` - Persona instruction framing the conversation
    /// * `history` - Earlier exchanges, oldest first
    /// * `new_message` - The newest user message
    async fn invoke(
        &self,
        system_instruction: &str,
        history: &[ReplayMessage],
        new_message: &str,
    ) -> Result<String, ModelError>;

    /// Single-shot generation without system instruction or history.
    async fn invoke_once(&self, prompt: &str) -> Result<String, ModelError>;
}
