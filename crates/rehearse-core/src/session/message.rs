//! Conversation message types.
//!
//! Two parallel histories exist per session: the display transcript made of
//! `Turn`s, and the replay history made of `ReplayMessage`s in the shape the
//! model expects.

use serde::{Deserialize, Serialize};

/// Who produced a turn in the display transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    /// The interviewer persona (model output).
    Interviewer,
    /// The person practicing.
    Candidate,
    /// Reserved for the final feedback report.
    System,
}

impl Speaker {
    /// Label used when the transcript is sent for analysis.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Speaker::Candidate => "User",
            Speaker::Interviewer | Speaker::System => "Interviewer",
        }
    }
}

/// One utterance in the display transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    /// Timestamp when the turn was recorded (RFC 3339 format).
    pub timestamp: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn interviewer(text: impl Into<String>) -> Self {
        Self::new(Speaker::Interviewer, text)
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self::new(Speaker::Candidate, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Speaker::System, text)
    }
}

/// Conversational roles understood by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayRole {
    User,
    Model,
}

impl ReplayRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayRole::User => "user",
            ReplayRole::Model => "model",
        }
    }
}

/// One entry of the replay history resent to the model on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayMessage {
    pub role: ReplayRole,
    pub content: String,
}

impl ReplayMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ReplayRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ReplayRole::Model,
            content: content.into(),
        }
    }
}
