use std::time::Instant;

use autofill_core_types::{ScopeId, SessionId};
use serde::Serialize;

use crate::model::{SessionState, SubmissionSource};
use crate::outcome::SessionOutcome;

/// One logical autofill interaction, anchored to a scope.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    scope: ScopeId,
    state: SessionState,
    pub(crate) suggestion_used: bool,
    pub(crate) user_edited_after_suggestion: bool,
    pub(crate) user_edited_any_field: bool,
    started_at: Instant,
}

impl Session {
    pub(crate) fn start(scope: ScopeId) -> Self {
        Self {
            id: SessionId::new(),
            scope,
            state: SessionState::Active,
            suggestion_used: false,
            user_edited_after_suggestion: false,
            user_edited_any_field: false,
            started_at: Instant::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn suggestion_used(&self) -> bool {
        self.suggestion_used
    }

    pub fn user_edited_after_suggestion(&self) -> bool {
        self.user_edited_after_suggestion
    }

    pub fn user_edited_any_field(&self) -> bool {
        self.user_edited_any_field
    }

    /// Consumes the session into its terminal report.
    pub(crate) fn finish(mut self, submission: Option<SubmissionSource>) -> SessionReport {
        self.state = if submission.is_some() {
            SessionState::Committed
        } else {
            SessionState::Cancelled
        };
        SessionReport {
            session: self.id,
            scope: self.scope,
            final_state: self.state,
            outcome: SessionOutcome::classify(
                self.suggestion_used,
                self.user_edited_any_field,
                submission.is_some(),
            ),
            submission,
            suggestion_used: self.suggestion_used,
            user_edited_after_suggestion: self.user_edited_after_suggestion,
            user_edited_any_field: self.user_edited_any_field,
            duration_ms: self.started_at.elapsed().as_millis() as u64,
        }
    }
}

/// What a completed session reports before the tracker resets.
#[derive(Clone, Debug, Serialize)]
pub struct SessionReport {
    pub session: SessionId,
    pub scope: ScopeId,
    pub final_state: SessionState,
    pub outcome: SessionOutcome,
    pub submission: Option<SubmissionSource>,
    pub suggestion_used: bool,
    pub user_edited_after_suggestion: bool,
    pub user_edited_any_field: bool,
    pub duration_ms: u64,
}

impl SessionReport {
    pub fn submitted(&self) -> bool {
        self.submission.is_some()
    }
}
