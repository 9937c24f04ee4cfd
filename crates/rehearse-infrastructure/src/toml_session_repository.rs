//! TOML-based SessionRepository implementation

use crate::paths::RehearsePaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use rehearse_core::error::{RehearseError, Result};
use rehearse_core::session::{InterviewSession, SessionRepository};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each session as its own TOML file.
///
/// ```text
/// sessions/
/// ├── caller-1.toml
/// └── caller%2F2.toml
/// ```
///
/// Caller ids are percent-encoded into file names, so any id maps to exactly
/// one file inside the directory.
pub struct TomlSessionRepository {
    sessions_dir: PathBuf,
}

impl TomlSessionRepository {
    /// Creates the repository, creating `sessions_dir` if needed.
    pub fn new(sessions_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = sessions_dir.as_ref().to_path_buf();
        fs::create_dir_all(&sessions_dir)?;
        Ok(Self { sessions_dir })
    }

    /// Uses the sessions directory resolved from `paths`.
    pub fn from_paths(paths: &RehearsePaths) -> Result<Self> {
        Self::new(paths.sessions_dir()?)
    }

    fn session_file(&self, session_id: &str) -> AtomicTomlFile<InterviewSession> {
        AtomicTomlFile::new(
            self.sessions_dir
                .join(format!("{}.toml", encode_file_stem(session_id))),
        )
    }
}

fn encode_file_stem(session_id: &str) -> String {
    let mut encoded = String::with_capacity(session_id.len());
    for byte in session_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<InterviewSession>> {
        self.session_file(session_id).load().map_err(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "Failed to load session");
            RehearseError::data_access(format!("Failed to load session '{session_id}': {err}"))
        })
    }

    async fn save(&self, session: &InterviewSession) -> Result<()> {
        let file = self.session_file(&session.id);
        file.save(session).map_err(|err| {
            RehearseError::data_access(format!("Failed to save session '{}': {err}", session.id))
        })?;
        tracing::debug!(session_id = %session.id, path = %file.path().display(), "Saved session");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.session_file(session_id).remove()
    }

    async fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.sessions_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_encoding() {
        assert_eq!(encode_file_stem("caller-1_a"), "caller-1_a");
        assert_eq!(encode_file_stem("../etc"), "%2E%2E%2Fetc");
        assert_eq!(encode_file_stem("a b"), "a%20b");
        assert_ne!(encode_file_stem("a/b"), encode_file_stem("a_b"));
    }
}
