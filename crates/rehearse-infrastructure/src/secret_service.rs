//! Secret service implementation.
//!
//! The `GEMINI_API_KEY` environment variable wins; otherwise `secret.json`
//! in the config directory is read. Key values are never logged.

use crate::paths::RehearsePaths;
use rehearse_core::config::{GeminiConfig, SecretConfig};
use rehearse_core::error::Result;
use rehearse_core::secret::SecretService;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Loads secrets from the environment, then from `secret.json`.
#[derive(Clone)]
pub struct SecretServiceImpl {
    secret_file: PathBuf,
    env: EnvLookup,
}

impl SecretServiceImpl {
    /// Reads the process environment and the resolved `secret.json`.
    pub fn new(paths: &RehearsePaths) -> Result<Self> {
        Ok(Self {
            secret_file: paths.secret_file()?,
            env: Arc::new(|name| std::env::var(name).ok()),
        })
    }

    /// Replaces the environment lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    async fn load_secret_file(&self) -> Result<SecretConfig> {
        let content = match tokio::fs::read_to_string(&self.secret_file).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.secret_file.display(), "No secret file");
                return Ok(SecretConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(api_key) = (self.env)(GEMINI_API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            tracing::debug!("Using Gemini API key from environment");
            return Ok(SecretConfig {
                gemini: Some(GeminiConfig { api_key }),
            });
        }
        self.load_secret_file().await
    }
}
