//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml`. A missing or blank file yields the
//! defaults; a malformed file is reported instead of silently ignored.

use crate::paths::RehearsePaths;
use crate::storage::AtomicTomlFile;
use rehearse_core::config::AppConfig;
use rehearse_core::error::Result;
use std::path::PathBuf;

/// Reads and writes the application configuration file.
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: &RehearsePaths) -> Result<Self> {
        Ok(Self::at(paths.config_file()?))
    }

    /// Uses an explicit config file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<AppConfig> {
        match self.file.load()? {
            Some(config) => {
                tracing::debug!(path = %self.file.path().display(), "Loaded config");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %self.file.path().display(), "No config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.save(config)
    }
}
