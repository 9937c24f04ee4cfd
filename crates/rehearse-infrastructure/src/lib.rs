//! Filesystem and in-process adapters for the Rehearse domain traits.

pub mod config_service;
pub mod in_memory_session_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;
pub mod toml_session_repository;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_session_repository::InMemorySessionRepository;
pub use crate::paths::RehearsePaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::toml_session_repository::TomlSessionRepository;
