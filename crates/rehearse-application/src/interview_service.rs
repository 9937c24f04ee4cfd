//! Interview use case implementation.
//!
//! `InterviewService` is the single entry point the transports use. Every
//! candidate action loads the caller's session, runs the orchestrator on a
//! working copy, and saves the copy only if orchestration succeeded, so the
//! stored record always reflects the last successful action.

use rehearse_core::client::InterviewModel;
use rehearse_core::error::{RehearseError, Result};
use rehearse_core::session::{InterviewSession, InterviewState, SessionRepository, Turn};
use rehearse_core::setup::SetupDraft;
use rehearse_interaction::{InterviewOrchestrator, InterviewReply};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Use case for running mock interviews, one session per caller.
///
/// # Thread Safety
///
/// Actions for the same caller are serialized by a per-caller lock; callers
/// never block each other.
pub struct InterviewService {
    orchestrator: InterviewOrchestrator,
    session_repository: Arc<dyn SessionRepository>,
    caller_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl InterviewService {
    /// Creates a new `InterviewService`.
    ///
    /// # Arguments
    ///
    /// * `model` - Generative model used for interviewer turns and feedback
    /// * `session_repository` - Store holding one session per caller
    pub fn new(model: Arc<dyn InterviewModel>, session_repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            orchestrator: InterviewOrchestrator::new(model),
            session_repository,
            caller_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Completes setup and starts the interview.
    ///
    /// Replaces any previous session of the caller. Returns the interviewer's
    /// welcome and first question.
    ///
    /// # Errors
    ///
    /// - `SetupIncomplete` if the draft misses a parameter
    /// - `ModelUnavailable` if the first question could not be generated;
    ///   any previous session is then left as it was
    pub async fn start(&self, session_id: &str, draft: SetupDraft) -> Result<Turn> {
        let setup = draft.complete()?;
        let _guard = self.lock_caller(session_id).await;

        let session = self.orchestrator.begin(session_id, setup).await?;
        self.session_repository.save(&session).await?;

        session
            .transcript
            .first()
            .cloned()
            .ok_or_else(|| RehearseError::internal("started session has no opening turn"))
    }

    /// Sends one candidate message.
    ///
    /// # Errors
    ///
    /// - `SetupIncomplete` if the caller has no session
    /// - `SessionInactive` if the interview already ended
    /// - `Validation` if the message is blank
    /// - `ModelUnavailable` if the model call failed
    ///
    /// The stored session is unchanged on every error.
    pub async fn send(&self, session_id: &str, message: &str) -> Result<InterviewReply> {
        let _guard = self.lock_caller(session_id).await;

        let mut session = self.load(session_id).await?;
        let reply = self.orchestrator.respond(&mut session, message).await?;
        self.session_repository.save(&session).await?;

        if reply.is_final {
            tracing::info!(session_id = %session_id, "Interview ended");
        }
        Ok(reply)
    }

    /// `Setup` when the caller has no session.
    pub async fn state(&self, session_id: &str) -> Result<InterviewState> {
        Ok(self
            .session_repository
            .find_by_id(session_id)
            .await?
            .map(|session| session.state())
            .unwrap_or(InterviewState::Setup))
    }

    pub async fn transcript(&self, session_id: &str) -> Result<Vec<Turn>> {
        Ok(self.load(session_id).await?.transcript)
    }

    /// Full stored record, if any.
    pub async fn session(&self, session_id: &str) -> Result<Option<InterviewSession>> {
        self.session_repository.find_by_id(session_id).await
    }

    /// Discards the caller's session so setup can begin again.
    pub async fn reset(&self, session_id: &str) -> Result<()> {
        let _guard = self.lock_caller(session_id).await;
        self.session_repository.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session reset");
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<InterviewSession> {
        self.session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| RehearseError::setup_incomplete("session"))
    }

    async fn lock_caller(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.caller_locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
