//! The service against the file-backed store, including a process restart.

use async_trait::async_trait;
use rehearse_application::InterviewService;
use rehearse_core::client::{InterviewModel, ModelError};
use rehearse_core::prompt::FEEDBACK_SECTIONS;
use rehearse_core::session::{InterviewState, ReplayMessage, SessionRepository, Speaker};
use rehearse_core::setup::{InterviewType, SetupDraft};
use rehearse_infrastructure::{RehearsePaths, TomlSessionRepository};
use std::sync::Arc;
use tempfile::TempDir;

/// Echoes how much history it was given.
struct HistoryEcho;

#[async_trait]
impl InterviewModel for HistoryEcho {
    async fn invoke(
        &self,
        _system_instruction: &str,
        history: &[ReplayMessage],
        new_message: &str,
    ) -> Result<String, ModelError> {
        Ok(format!("Seen {} messages, last was {new_message:?}", history.len()))
    }

    async fn invoke_once(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok(FEEDBACK_SECTIONS.join("\n"))
    }
}

fn service(temp_dir: &TempDir) -> InterviewService {
    let repo = TomlSessionRepository::from_paths(&RehearsePaths::new(Some(temp_dir.path()))).unwrap();
    InterviewService::new(Arc::new(HistoryEcho), Arc::new(repo))
}

fn draft() -> SetupDraft {
    SetupDraft::new()
        .with_domain("Engineering")
        .with_role_and_level("Civil Engineer", "Entry")
        .with_interview_type(InterviewType::Technical)
}

#[tokio::test]
async fn interview_resumes_after_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let service = service(&temp_dir);
        let opening = service.start("caller-7", draft()).await.unwrap();
        assert_eq!(opening.speaker, Speaker::Interviewer);
        assert_eq!(opening.text, "Seen 0 messages, last was \"Start the interview.\".");
        service.send("caller-7", "Load paths matter.").await.unwrap();
    }

    let service = service(&temp_dir);
    assert_eq!(service.state("caller-7").await.unwrap(), InterviewState::Active);

    let reply = service.send("caller-7", "Beams and columns.").await.unwrap();
    assert_eq!(reply.response_text, "Seen 4 messages, last was \"Beams and columns.\".");

    let reply = service.send("caller-7", "END INTERVIEW").await.unwrap();
    assert!(reply.is_final);
    for section in FEEDBACK_SECTIONS {
        assert!(reply.response_text.contains(section));
    }

    let transcript = service.transcript("caller-7").await.unwrap();
    assert_eq!(transcript.len(), 7);
    assert_eq!(transcript[5].text, "END INTERVIEW");
    assert_eq!(transcript[6].speaker, Speaker::System);
}

#[tokio::test]
async fn reset_removes_the_session_file() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(&temp_dir);
    service.start("caller-8", draft()).await.unwrap();
    assert!(temp_dir.path().join("sessions/caller-8.toml").exists());

    service.reset("caller-8").await.unwrap();

    assert!(!temp_dir.path().join("sessions/caller-8.toml").exists());
    let repo = TomlSessionRepository::new(temp_dir.path().join("sessions")).unwrap();
    assert!(repo.find_by_id("caller-8").await.unwrap().is_none());
}
