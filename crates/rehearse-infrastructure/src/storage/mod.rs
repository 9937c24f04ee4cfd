//! Storage primitives shared by the file-backed services.

pub mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;
