//! Interview setup parameters and the multi-step draft that collects them.

use crate::error::{RehearseError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The primary focus of an interview.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum InterviewType {
    #[strum(to_string = "Technical")]
    Technical,
    #[strum(to_string = "Managerial")]
    Managerial,
    #[serde(rename = "HR/Behavioral")]
    #[strum(to_string = "HR/Behavioral", serialize = "HR", serialize = "Behavioral")]
    HrBehavioral,
}

/// Parameters that fix the interviewer persona for a whole session.
///
/// Immutable once the interview has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupParameters {
    pub domain: String,
    pub role: String,
    pub level: String,
    pub interview_type: InterviewType,
}

/// Setup values collected so far.
///
/// The three steps mirror the setup flow: domain first, then role and level,
/// then the interview type. Any step may be redone before `complete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDraft {
    pub domain: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
    pub interview_type: Option<InterviewType>,
}

impl SetupDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1: choose the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = non_blank(domain.into());
        self
    }

    /// Step 2: role and seniority level. Both are trimmed.
    pub fn with_role_and_level(mut self, role: impl Into<String>, level: impl Into<String>) -> Self {
        self.role = non_blank(role.into());
        self.level = non_blank(level.into());
        self
    }

    /// Step 3: the interview focus.
    pub fn with_interview_type(mut self, interview_type: InterviewType) -> Self {
        self.interview_type = Some(interview_type);
        self
    }

    /// Name of the first field that still needs a value, if any.
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.domain.is_none() {
            Some("domain")
        } else if self.role.is_none() {
            Some("role")
        } else if self.level.is_none() {
            Some("level")
        } else if self.interview_type.is_none() {
            Some("interview_type")
        } else {
            None
        }
    }

    /// Finishes setup.
    ///
    /// # Errors
    ///
    /// Returns `SetupIncomplete` naming the first missing field.
    pub fn complete(self) -> Result<SetupParameters> {
        if let Some(missing) = self.first_missing() {
            return Err(RehearseError::setup_incomplete(missing));
        }

        match (self.domain, self.role, self.level, self.interview_type) {
            (Some(domain), Some(role), Some(level), Some(interview_type)) => Ok(SetupParameters {
                domain,
                role,
                level,
                interview_type,
            }),
            _ => Err(RehearseError::internal("setup draft changed during completion")),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
