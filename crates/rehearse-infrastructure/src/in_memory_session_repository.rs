//! Process-local session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rehearse_core::error::Result;
use rehearse_core::session::{InterviewSession, SessionRepository};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Keeps sessions in a map guarded by an async lock.
///
/// With a TTL, a session idle for longer than the TTL (measured from its
/// `updated_at`) reads back as absent and is evicted on that read.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, InterviewSession>>>,
    ttl: Option<Duration>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl: Some(ttl),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, session: &InterviewSession, now: DateTime<Utc>) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        match DateTime::parse_from_rfc3339(&session.updated_at) {
            Ok(updated_at) => {
                let idle = now.signed_duration_since(updated_at.with_timezone(&Utc));
                idle.to_std().map(|idle| idle > ttl).unwrap_or(false)
            }
            // A record we cannot date is treated as stale.
            Err(_) => true,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<InterviewSession>> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(session) if !self.is_expired(session, Utc::now()) => {
                    return Ok(Some(session.clone()));
                }
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check under the write lock; a concurrent save may have refreshed it.
        if let Some(session) = sessions.get(session_id) {
            if !self.is_expired(session, Utc::now()) {
                return Ok(Some(session.clone()));
            }
            sessions.remove(session_id);
            tracing::info!(session_id = %session_id, "Evicted expired session");
        }
        Ok(None)
    }

    async fn save(&self, session: &InterviewSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.clear();
        Ok(())
    }
}
