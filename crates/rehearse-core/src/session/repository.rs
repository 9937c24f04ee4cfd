//! Session repository trait.
//!
//! Defines the interface for per-caller session storage.

use super::model::InterviewSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for interview sessions, keyed by caller identity.
///
/// Each `save` replaces the caller's whole record, so one request never
/// leaves a half-written session behind. No cross-key transactions exist.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds the session stored for a caller.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(InterviewSession))`: Session found
    /// - `Ok(None)`: No session, or the session expired
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<InterviewSession>>;

    /// Stores a session, replacing any previous record for the same id.
    async fn save(&self, session: &InterviewSession) -> Result<()>;

    /// Deletes a caller's session. Deleting a missing session is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Removes every stored session.
    async fn clear(&self) -> Result<()>;
}
