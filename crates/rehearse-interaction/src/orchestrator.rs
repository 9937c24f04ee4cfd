//! Conversation orchestration for a single interview.
//!
//! `InterviewOrchestrator` owns the lifecycle Setup → Active → Ended. It
//! receives the session explicitly on every call, rebuilds the model
//! conversation from the stored replay history, and only mutates the session
//! after the model call succeeded.

use rehearse_core::client::{InterviewModel, ModelError};
use rehearse_core::error::{RehearseError, Result};
use rehearse_core::normalizer::normalize;
use rehearse_core::prompt::{
    BOOTSTRAP_MESSAGE, feedback_request, is_termination_phrase, persona_prompt_for,
};
use rehearse_core::session::{InterviewSession, ReplayMessage, Turn, render_transcript};
use rehearse_core::setup::SetupParameters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the transport receives for one candidate message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewReply {
    /// Interviewer question or, when `is_final`, the feedback report.
    pub response_text: String,
    /// True once the interview has ended and `response_text` is the report.
    pub is_final: bool,
}

/// Drives one interview at a time through the model.
#[derive(Clone)]
pub struct InterviewOrchestrator {
    model: Arc<dyn InterviewModel>,
}

impl InterviewOrchestrator {
    pub fn new(model: Arc<dyn InterviewModel>) -> Self {
        Self { model }
    }

    /// Setup → Active: asks the model for the welcome and first question.
    ///
    /// The returned session holds one Interviewer turn and a two-entry replay
    /// history (bootstrap request and normalized answer).
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` if the model call fails or yields no usable text.
    pub async fn begin(
        &self,
        session_id: impl Into<String>,
        setup: SetupParameters,
    ) -> Result<InterviewSession> {
        let session_id = session_id.into();
        let system_prompt = persona_prompt_for(&setup);

        tracing::info!(
            session_id = %session_id,
            role = %setup.role,
            level = %setup.level,
            interview_type = %setup.interview_type,
            "Starting interview"
        );

        let raw = self
            .model
            .invoke(&system_prompt, &[], BOOTSTRAP_MESSAGE)
            .await
            .map_err(|err| model_failure(&session_id, err))?;
        let question = interviewer_text(&session_id, &raw)?;

        let mut session = InterviewSession::new(session_id, setup);
        session.transcript.push(Turn::interviewer(question.clone()));
        session.replay_history = vec![
            ReplayMessage::user(BOOTSTRAP_MESSAGE),
            ReplayMessage::model(question),
        ];
        session.active = true;
        Ok(session)
    }

    /// Handles one candidate message.
    ///
    /// The termination phrase ends the interview and returns the feedback
    /// report; anything else returns the interviewer's next turn.
    ///
    /// # Errors
    ///
    /// - `SessionInactive` if the interview is not active
    /// - `Validation` if the message is blank
    /// - `ModelUnavailable` if the model call fails
    ///
    /// On every error the session is left untouched.
    pub async fn respond(&self, session: &mut InterviewSession, input: &str) -> Result<InterviewReply> {
        if !session.accepts_candidate_turns() {
            return Err(RehearseError::SessionInactive);
        }

        let input = input.trim();
        if input.is_empty() {
            return Err(RehearseError::validation("Please provide a response."));
        }

        if is_termination_phrase(input) {
            self.conclude(session, input).await
        } else {
            self.continue_interview(session, input).await
        }
    }

    async fn continue_interview(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> Result<InterviewReply> {
        let system_prompt = persona_prompt_for(&session.setup);

        tracing::debug!(
            session_id = %session.id,
            history_len = session.replay_history.len(),
            "Replaying history for candidate turn"
        );

        let raw = self
            .model
            .invoke(&system_prompt, &session.replay_history, input)
            .await
            .map_err(|err| model_failure(&session.id, err))?;
        let reply = interviewer_text(&session.id, &raw)?;

        session.transcript.push(Turn::candidate(input));
        session.transcript.push(Turn::interviewer(reply.clone()));
        session.replay_history.push(ReplayMessage::user(input));
        session.replay_history.push(ReplayMessage::model(reply.clone()));
        session.touch();

        Ok(InterviewReply {
            response_text: reply,
            is_final: false,
        })
    }

    async fn conclude(&self, session: &mut InterviewSession, input: &str) -> Result<InterviewReply> {
        let closing_turn = Turn::candidate(input);
        let transcript = render_transcript(session.transcript.iter().chain([&closing_turn]));

        tracing::info!(
            session_id = %session.id,
            turns = session.transcript.len() + 1,
            "Ending interview, requesting feedback"
        );

        let feedback = self
            .model
            .invoke_once(&feedback_request(&transcript))
            .await
            .map_err(|err| model_failure(&session.id, err))?;

        session.transcript.push(closing_turn);
        session.transcript.push(Turn::system(feedback.clone()));
        session.replay_history.clear();
        session.active = false;
        session.touch();

        Ok(InterviewReply {
            response_text: feedback,
            is_final: true,
        })
    }
}

/// Normalizes interviewer output; an empty result counts as a bad response.
fn interviewer_text(session_id: &str, raw: &str) -> Result<String> {
    let text = normalize(raw);
    if text.is_empty() {
        return Err(model_failure(
            session_id,
            ModelError::MalformedResponse("model returned no interviewer text".to_string()),
        ));
    }
    Ok(text)
}

fn model_failure(session_id: &str, err: ModelError) -> RehearseError {
    tracing::warn!(session_id = %session_id, error = %err, "Model call failed");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rehearse_core::session::{ReplayRole, Speaker};
    use rehearse_core::setup::InterviewType;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Invoke {
            system: String,
            history: Vec<ReplayMessage>,
            message: String,
        },
        Once {
            prompt: String,
        },
    }

    /// Replies from a script and records every call.
    struct ScriptedModel {
        replies: Mutex<VecDeque<std::result::Result<String, ModelError>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<std::result::Result<String, ModelError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next_reply(&self) -> std::result::Result<String, ModelError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ModelError::InvalidRequest("script exhausted".to_string())))
        }
    }

    #[async_trait]
    impl InterviewModel for ScriptedModel {
        async fn invoke(
            &self,
            system_instruction: &str,
            history: &[ReplayMessage],
            new_message: &str,
        ) -> std::result::Result<String, ModelError> {
            self.calls.lock().unwrap().push(Call::Invoke {
                system: system_instruction.to_string(),
                history: history.to_vec(),
                message: new_message.to_string(),
            });
            self.next_reply()
        }

        async fn invoke_once(&self, prompt: &str) -> std::result::Result<String, ModelError> {
            self.calls.lock().unwrap().push(Call::Once {
                prompt: prompt.to_string(),
            });
            self.next_reply()
        }
    }

    fn setup() -> SetupParameters {
        SetupParameters {
            domain: "Tech & IT".to_string(),
            role: "Software Engineer".to_string(),
            level: "Mid".to_string(),
            interview_type: InterviewType::Technical,
        }
    }

    fn outage() -> ModelError {
        ModelError::ProcessError {
            status_code: Some(503),
            message: "UNAVAILABLE".to_string(),
            is_retryable: true,
            retry_after: None,
        }
    }

    #[tokio::test]
    async fn test_begin_normalizes_first_question() {
        let model = ScriptedModel::new(vec![Ok(
            "speaker high volume play Welcome!  Tell me about   yourself".to_string(),
        )]);
        let orchestrator = InterviewOrchestrator::new(model.clone());

        let session = orchestrator.begin("caller", setup()).await.unwrap();

        assert!(session.active);
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript[0].speaker, Speaker::Interviewer);
        assert_eq!(session.transcript[0].text, "Welcome! Tell me about yourself.");
        assert_eq!(
            session.replay_history,
            vec![
                ReplayMessage::user(BOOTSTRAP_MESSAGE),
                ReplayMessage::model("Welcome! Tell me about yourself."),
            ]
        );

        match &model.calls()[0] {
            Call::Invoke {
                system,
                history,
                message,
            } => {
                assert_eq!(system, &persona_prompt_for(&setup()));
                assert!(history.is_empty());
                assert_eq!(message, BOOTSTRAP_MESSAGE);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_begin_with_blank_model_output_fails() {
        let model = ScriptedModel::new(vec![Ok("  speaker high volume ".to_string())]);
        let orchestrator = InterviewOrchestrator::new(model);

        let err = orchestrator.begin("caller", setup()).await.unwrap_err();
        assert!(err.is_model_unavailable());
    }

    #[tokio::test]
    async fn test_respond_replays_full_history() {
        let model = ScriptedModel::new(vec![
            Ok("Welcome. What is ownership?".to_string()),
            Ok("Good. What is borrowing".to_string()),
        ]);
        let orchestrator = InterviewOrchestrator::new(model.clone());
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();

        let reply = orchestrator
            .respond(&mut session, "  Each value has one owner.  ")
            .await
            .unwrap();

        assert_eq!(
            reply,
            InterviewReply {
                response_text: "Good. What is borrowing.".to_string(),
                is_final: false,
            }
        );
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[1].speaker, Speaker::Candidate);
        assert_eq!(session.transcript[1].text, "Each value has one owner.");
        assert_eq!(session.replay_history.len(), session.transcript.len() + 1);
        assert_eq!(session.replay_history[2].role, ReplayRole::User);
        assert_eq!(session.replay_history[3].role, ReplayRole::Model);

        match &model.calls()[1] {
            Call::Invoke {
                history, message, ..
            } => {
                assert_eq!(history.len(), 2);
                assert_eq!(message, "Each value has one owner.");
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_without_model_call() {
        let model = ScriptedModel::new(vec![Ok("Welcome. First question?".to_string())]);
        let orchestrator = InterviewOrchestrator::new(model.clone());
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();
        let before = session.clone();

        let err = orchestrator.respond(&mut session, "").await.unwrap_err();
        assert!(err.is_validation());
        let err = orchestrator.respond(&mut session, " \n\t").await.unwrap_err();
        assert!(err.is_validation());

        assert_eq!(session, before);
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_leaves_session_untouched() {
        let model = ScriptedModel::new(vec![Ok("Welcome. First question?".to_string()), Err(outage())]);
        let orchestrator = InterviewOrchestrator::new(model);
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();
        let before = session.clone();

        let err = orchestrator.respond(&mut session, "My answer").await.unwrap_err();

        assert!(err.is_model_unavailable());
        assert!(err.is_retryable());
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_feedback_failure_keeps_interview_active() {
        let model = ScriptedModel::new(vec![Ok("Welcome. First question?".to_string()), Err(outage())]);
        let orchestrator = InterviewOrchestrator::new(model);
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();
        let before = session.clone();

        let err = orchestrator.respond(&mut session, "END INTERVIEW").await.unwrap_err();

        assert!(err.is_model_unavailable());
        assert_eq!(session, before);
        assert!(session.accepts_candidate_turns());
    }

    #[tokio::test]
    async fn test_termination_sends_transcript_for_feedback() {
        let model = ScriptedModel::new(vec![
            Ok("Welcome. What is a trait?".to_string()),
            Ok("And a lifetime?".to_string()),
            Ok("1. Overall Impression (Score 1-5): 4/5".to_string()),
        ]);
        let orchestrator = InterviewOrchestrator::new(model.clone());
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();
        orchestrator.respond(&mut session, "A shared interface.").await.unwrap();

        let reply = orchestrator.respond(&mut session, "end interview").await.unwrap();

        assert!(reply.is_final);
        assert_eq!(reply.response_text, "1. Overall Impression (Score 1-5): 4/5");
        assert!(!session.active);
        assert!(session.replay_history.is_empty());
        assert_eq!(session.transcript.len(), 5);
        assert_eq!(session.transcript[3].speaker, Speaker::Candidate);
        assert_eq!(session.transcript[3].text, "end interview");
        assert_eq!(session.transcript[4].speaker, Speaker::System);

        let calls = model.calls();
        assert_eq!(calls.len(), 3);
        match &calls[2] {
            Call::Once { prompt } => {
                assert!(prompt.contains("Senior HR Analyst"));
                assert!(prompt.ends_with(
                    "Transcript:\n(Interviewer): Welcome. What is a trait?\n(User): A shared interface.\n(Interviewer): And a lifetime?\n(User): end interview"
                ));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_turns_after_termination_are_refused() {
        let model = ScriptedModel::new(vec![
            Ok("Welcome. First question?".to_string()),
            Ok("Report".to_string()),
        ]);
        let orchestrator = InterviewOrchestrator::new(model.clone());
        let mut session = orchestrator.begin("caller", setup()).await.unwrap();
        orchestrator.respond(&mut session, "End Interview").await.unwrap();
        let ended = session.clone();

        let err = orchestrator.respond(&mut session, "One more answer").await.unwrap_err();
        assert!(err.is_session_inactive());
        let err = orchestrator.respond(&mut session, "").await.unwrap_err();
        assert!(err.is_session_inactive());

        assert_eq!(session, ended);
        assert_eq!(model.calls().len(), 2);
    }
}
