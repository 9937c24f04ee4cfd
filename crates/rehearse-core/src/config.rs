//! Configuration models.
//!
//! `AppConfig` comes from `config.toml`; `SecretConfig` holds API keys and is
//! kept apart so it is never written next to ordinary settings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Which session store backs the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SessionStoreKind {
    /// Process memory; sessions vanish on exit.
    #[default]
    Memory,
    /// One TOML file per session under the sessions directory.
    File,
}

/// Application settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini model name
    pub model: String,
    /// Base URL of the Gemini models endpoint
    pub api_base_url: String,
    /// Timeout applied to each model request
    pub request_timeout_secs: u64,
    pub session_store: SessionStoreKind,
    /// Idle time after which an in-memory session expires
    pub session_ttl_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_store: SessionStoreKind::default(),
            session_ttl_secs: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
