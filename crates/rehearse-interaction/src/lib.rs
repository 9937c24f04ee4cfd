//! Model access and conversation orchestration for Rehearse.

pub mod gemini_client;
pub mod orchestrator;

pub use gemini_client::GeminiClient;
pub use orchestrator::{InterviewOrchestrator, InterviewReply};
