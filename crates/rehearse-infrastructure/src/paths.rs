//! Unified path management for Rehearse files.
//!
//! Everything lives under one config directory so a single `--base-dir`
//! override relocates configuration, secrets, sessions and logs together.

use rehearse_core::error::{RehearseError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "rehearse";

/// Path resolver for Rehearse.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/rehearse/          # Config directory (platform default)
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// ├── sessions/                # One TOML file per session (file store)
/// └── logs/                    # Application logs
///     └── rehearse.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct RehearsePaths {
    base_dir: Option<PathBuf>,
}

impl RehearsePaths {
    /// Creates a resolver. `base_dir` replaces the platform config directory.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the Rehearse configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when no base directory was given and the
    /// platform config directory cannot be determined.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| RehearseError::config("Cannot find the user config directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// Keep this file readable by the owner only (mode 600).
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn sessions_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("sessions"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}
