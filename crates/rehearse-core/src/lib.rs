//! Domain layer for Rehearse.
//!
//! Holds the interview session model, setup parameters, the fixed prompts,
//! interviewer text normalization, and the traits the outer crates implement
//! (`InterviewModel`, `SessionRepository`, `SecretService`).

pub mod client;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod prompt;
pub mod secret;
pub mod session;
pub mod setup;

// Re-export common error type
pub use error::{RehearseError, Result};
