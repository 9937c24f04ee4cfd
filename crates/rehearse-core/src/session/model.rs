//! Interview session domain model.

use super::message::{ReplayMessage, Speaker, Turn};
use crate::setup::SetupParameters;
use serde::{Deserialize, Serialize};

/// Where an interview is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewState {
    /// Parameters are still being collected; no session record exists yet.
    Setup,
    /// Questions are being asked and candidate turns are accepted.
    Active,
    /// Feedback was produced; candidate turns are refused.
    Ended,
}

/// All state held for one caller.
///
/// Created when setup completes, mutated only by the orchestrator, and
/// dropped on reset or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    /// Caller identity the record is keyed by
    pub id: String,
    pub active: bool,
    /// Timestamp when the session was created (RFC 3339 format)
    pub created_at: String,
    /// Timestamp of the last mutation (RFC 3339 format)
    pub updated_at: String,
    pub setup: SetupParameters,
    /// Display transcript, in chronological order
    #[serde(default)]
    pub transcript: Vec<Turn>,
    /// History in model shape, resent on every turn
    #[serde(default)]
    pub replay_history: Vec<ReplayMessage>,
}

impl InterviewSession {
    /// A fresh record with empty histories, not yet active.
    pub fn new(id: impl Into<String>, setup: SetupParameters) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            active: false,
            created_at: now.clone(),
            updated_at: now,
            setup,
            transcript: Vec::new(),
            replay_history: Vec::new(),
        }
    }

    pub fn state(&self) -> InterviewState {
        if self.active {
            InterviewState::Active
        } else if self.transcript.is_empty() {
            InterviewState::Setup
        } else {
            InterviewState::Ended
        }
    }

    /// Whether a candidate turn may be accepted.
    pub fn accepts_candidate_turns(&self) -> bool {
        self.active && !self.replay_history.is_empty()
    }

    /// Records a mutation time.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// The final feedback text, once the interview has ended.
    pub fn feedback(&self) -> Option<&str> {
        self.transcript
            .last()
            .filter(|turn| turn.speaker == Speaker::System)
            .map(|turn| turn.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::InterviewType;

    fn setup() -> SetupParameters {
        SetupParameters {
            domain: "Tech & IT".to_string(),
            role: "Software Engineer".to_string(),
            level: "Mid".to_string(),
            interview_type: InterviewType::Technical,
        }
    }

    #[test]
    fn test_new_session_is_in_setup_state() {
        let session = InterviewSession::new("caller-1", setup());
        assert_eq!(session.state(), InterviewState::Setup);
        assert!(!session.accepts_candidate_turns());
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_state_transitions_follow_fields() {
        let mut session = InterviewSession::new("caller-1", setup());
        session.transcript.push(Turn::interviewer("Welcome."));
        session.replay_history.push(ReplayMessage::user("Start the interview."));
        session.replay_history.push(ReplayMessage::model("Welcome."));
        session.active = true;
        assert_eq!(session.state(), InterviewState::Active);
        assert!(session.accepts_candidate_turns());

        session.transcript.push(Turn::candidate("END INTERVIEW"));
        session.transcript.push(Turn::system("Report"));
        session.replay_history.clear();
        session.active = false;
        assert_eq!(session.state(), InterviewState::Ended);
        assert_eq!(session.feedback(), Some("Report"));
    }

    #[test]
    fn test_active_without_replay_history_refuses_turns() {
        let mut session = InterviewSession::new("caller-1", setup());
        session.active = true;
        assert!(!session.accepts_candidate_turns());
    }

    #[test]
    fn test_session_json_round_trip_uses_lowercase_roles() {
        let mut session = InterviewSession::new("caller-1", setup());
        session.replay_history.push(ReplayMessage::model("Hi."));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"role\":\"model\""));
        let back: InterviewSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
