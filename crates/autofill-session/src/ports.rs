use std::sync::Arc;

use autofill_policy_center::ClassifierKind;

use crate::model::{Navigation, SubmissionSource};
use crate::outcome::SessionOutcome;
use crate::session::Session;

/// Receives one enumerated outcome per completed session.
pub trait MetricsPort: Send + Sync {
    fn record_session_outcome(&self, outcome: SessionOutcome);
    fn record_submission_source(&self, source: SubmissionSource);
    fn record_user_changed_autofilled_field(&self, changed: bool);
    /// One sample per focus that starts a session, or would have started
    /// one had autofill been enabled.
    fn record_autofill_enabled(&self, enabled: bool);
    /// Milliseconds between session start and its end.
    fn record_suggestion_time(&self, millis: u64);
}

#[derive(Clone, Debug, Default)]
pub struct NullMetrics;

impl MetricsPort for NullMetrics {
    fn record_session_outcome(&self, _outcome: SessionOutcome) {}
    fn record_submission_source(&self, _source: SubmissionSource) {}
    fn record_user_changed_autofilled_field(&self, _changed: bool) {}
    fn record_autofill_enabled(&self, _enabled: bool) {}
    fn record_suggestion_time(&self, _millis: u64) {}
}

/// Decides whether a navigation ends the active session as a submission.
pub trait SubmissionClassifier: Send + Sync {
    fn classify(&self, navigation: &Navigation, session: &Session) -> Option<SubmissionSource>;
}

/// Every navigation abandons the session.
#[derive(Clone, Debug, Default)]
pub struct NeverSubmits;

impl SubmissionClassifier for NeverSubmits {
    fn classify(&self, _navigation: &Navigation, _session: &Session) -> Option<SubmissionSource> {
        None
    }
}

/// A renderer-initiated same-document navigation after the form was touched
/// counts as a probable submission.
#[derive(Clone, Debug, Default)]
pub struct SameDocumentAsSubmission;

impl SubmissionClassifier for SameDocumentAsSubmission {
    fn classify(&self, navigation: &Navigation, session: &Session) -> Option<SubmissionSource> {
        let touched = session.user_edited_any_field() || session.suggestion_used();
        if navigation.same_document && navigation.renderer_initiated && touched {
            Some(SubmissionSource::ProbablyFormSubmitted)
        } else {
            None
        }
    }
}

/// Any renderer-initiated navigation after the form was touched, including
/// a script assigning `window.location`, counts as a probable submission.
#[derive(Clone, Debug, Default)]
pub struct RendererInitiatedAsSubmission;

impl SubmissionClassifier for RendererInitiatedAsSubmission {
    fn classify(&self, navigation: &Navigation, session: &Session) -> Option<SubmissionSource> {
        let touched = session.user_edited_any_field() || session.suggestion_used();
        if navigation.renderer_initiated && touched {
            Some(SubmissionSource::ProbablyFormSubmitted)
        } else {
            None
        }
    }
}

pub fn classifier_for(kind: ClassifierKind) -> Arc<dyn SubmissionClassifier> {
    match kind {
        ClassifierKind::Never => Arc::new(NeverSubmits),
        ClassifierKind::SameDocument => Arc::new(SameDocumentAsSubmission),
        ClassifierKind::RendererInitiated => Arc::new(RendererInitiatedAsSubmission),
    }
}
