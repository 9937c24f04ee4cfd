//! Secret management service trait.
//!
//! Defines the interface for loading secret configuration (API keys).

use crate::config::SecretConfig;
use crate::error::{RehearseError, Result};

/// Service for loading secret configuration.
///
/// Implementations must never log secrets or put them into error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Returns the Gemini API key, or a `Config` error naming where to put one.
    async fn gemini_api_key(&self) -> Result<String> {
        self.load_secrets()
            .await?
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RehearseError::config(
                    "Gemini API key not found. Set GEMINI_API_KEY or add it to secret.json",
                )
            })
    }
}
