//! Session domain module.
//!
//! This module contains the interview session model, its message types, the
//! repository interface for per-caller storage, and transcript rendering.
//!
//! # Module Structure
//!
//! - `model`: Core session model (`InterviewSession`, `InterviewState`)
//! - `message`: Display and replay message types (`Turn`, `ReplayMessage`)
//! - `transcript`: Plain-text transcript used for feedback analysis
//! - `repository`: Repository trait for session storage

mod message;
mod model;
mod repository;
mod transcript;

// Re-export public API
pub use message::{ReplayMessage, ReplayRole, Speaker, Turn};
pub use model::{InterviewSession, InterviewState};
pub use repository::SessionRepository;
pub use transcript::render_transcript;
