//! Application layer for Rehearse.
//!
//! Coordinates the orchestrator with session storage so that each candidate
//! action is one load → orchestrate → save cycle.

pub mod interview_service;

pub use interview_service::InterviewService;
