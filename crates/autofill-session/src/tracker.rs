use std::collections::HashMap;
use std::sync::Arc;

use autofill_core_types::{FieldId, ScopeId};
use autofill_policy_center::TrackerPolicy;
use tracing::{debug, info, instrument, trace, warn};

use crate::errors::{AutofillError, MismatchError};
use crate::events::Notification;
use crate::model::{
    Event, Field, FieldDescriptor, FieldKind, FieldValue, InputOrigin, Navigation, SessionState,
    SubmissionSource,
};
use crate::observers::ObserverList;
use crate::ports::{MetricsPort, SubmissionClassifier};
use crate::session::{Session, SessionReport};

/// Result of one `fill` batch. Rejections never abort the batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    pub applied: Vec<FieldId>,
    pub rejected: Vec<(FieldId, AutofillError)>,
}

impl FillReport {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Turns ordered focus/edit/submit events for one document into ordered
/// session lifecycle notifications. At most one session is active.
pub struct AutofillSessionTracker {
    policy: TrackerPolicy,
    observers: Arc<ObserverList>,
    metrics: Arc<dyn MetricsPort>,
    classifier: Arc<dyn SubmissionClassifier>,
    fields: HashMap<FieldId, Field>,
    session: Option<Session>,
    focused: Option<FieldId>,
}

impl AutofillSessionTracker {
    pub(crate) fn new(
        policy: TrackerPolicy,
        observers: Arc<ObserverList>,
        metrics: Arc<dyn MetricsPort>,
        classifier: Arc<dyn SubmissionClassifier>,
    ) -> Self {
        Self {
            policy,
            observers,
            metrics,
            classifier,
            fields: HashMap::new(),
            session: None,
            focused: None,
        }
    }

    pub fn policy(&self) -> &TrackerPolicy {
        &self.policy
    }

    pub fn observers(&self) -> &Arc<ObserverList> {
        &self.observers
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(Session::state)
            .unwrap_or(SessionState::Idle)
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    pub fn focused_field(&self) -> Option<&FieldId> {
        self.focused.as_ref()
    }

    /// Registers a control. A field that is already known keeps its state.
    pub fn observe_field(&mut self, descriptor: FieldDescriptor) {
        if self.fields.contains_key(&descriptor.id) {
            trace!(field = %descriptor.id, "field already observed");
            return;
        }
        debug!(
            field = %descriptor.id,
            scope = %descriptor.scope,
            kind = %descriptor.kind,
            "field observed"
        );
        self.fields
            .insert(descriptor.id.clone(), Field::from(descriptor));
    }

    /// Dispatches one event. Returns the report of a session the event ended.
    pub fn handle(&mut self, event: Event) -> Option<SessionReport> {
        match event {
            Event::FocusEnter(field) => {
                self.on_focus_enter(&field);
                None
            }
            Event::FocusExit(field) => {
                self.on_focus_exit(&field);
                None
            }
            Event::ValueEdit {
                field,
                value,
                origin,
            } => {
                self.on_value_edit(&field, value, origin);
                None
            }
            Event::Submit(source) => self.submit(source),
            Event::Navigate(navigation) => self.on_navigate(&navigation),
        }
    }

    /// With autofill disabled by policy no session ever starts; each focus
    /// that would have started one is recorded as a disabled trigger.
    #[instrument(skip_all, fields(field = %field))]
    pub fn on_focus_enter(&mut self, field: &FieldId) {
        let scope = self.scope_of_or_admit(field);

        let active_scope = self.session.as_ref().map(|s| s.scope().clone());
        if active_scope.is_none() && !self.policy.session.enabled {
            debug!("autofill disabled; no session started");
            if self.policy.reporting.report_metrics {
                self.metrics.record_autofill_enabled(false);
            }
            return;
        }
        match active_scope {
            None => {
                if !self.policy.session.skip_redundant_cancel {
                    self.emit(Notification::Cancel);
                }
                self.start_session(field, scope);
            }
            Some(active) if active != scope => {
                if let Some(previous) = self.clear_focus() {
                    self.emit(Notification::ViewExited { field: previous });
                }
                if !self.policy.session.skip_redundant_cancel {
                    self.emit(Notification::Cancel);
                }
                if let Some(replaced) = self.session.take() {
                    let report = replaced.finish(None);
                    self.report(&report);
                }
                self.start_session(field, scope);
            }
            Some(_) => {
                if self.focused.as_ref() != Some(field) {
                    if let Some(previous) = self.clear_focus() {
                        self.emit(Notification::ViewExited { field: previous });
                    }
                }
                self.set_focus(field);
                self.emit(Notification::ViewEntered {
                    field: field.clone(),
                });
            }
        }
    }

    /// Blur of the focused field. The session stays active.
    #[instrument(skip_all, fields(field = %field))]
    pub fn on_focus_exit(&mut self, field: &FieldId) {
        if self.session.is_none() || self.focused.as_ref() != Some(field) {
            trace!("focus exit ignored");
            return;
        }
        if let Some(previous) = self.clear_focus() {
            self.emit(Notification::ViewExited { field: previous });
        }
    }

    #[instrument(skip_all, fields(field = %field, origin = ?origin))]
    pub fn on_value_edit(&mut self, field: &FieldId, value: FieldValue, origin: InputOrigin) {
        let Some(session) = self.session.as_mut() else {
            trace!("edit outside a session dropped");
            return;
        };
        let Some(target) = self.fields.get_mut(field) else {
            trace!("edit of unknown field dropped");
            return;
        };
        if target.scope != *session.scope() {
            trace!("edit outside the active scope dropped");
            return;
        }
        if !target.kind.accepts(&value) {
            warn!(
                expected = %target.kind,
                found = %value.kind(),
                "edit of mismatched kind dropped"
            );
            return;
        }

        target.value = value.clone();
        if origin == InputOrigin::Script {
            // the suggested value is gone once a script overwrites it
            target.autofilled = false;
            debug!("script value assignment");
            return;
        }
        session.user_edited_any_field = true;
        if target.autofilled {
            session.user_edited_after_suggestion = true;
        }
        self.emit(Notification::ValueChanged {
            field: field.clone(),
            value,
        });
    }

    /// Applies suggested values in order. Each value that applies yields one
    /// `ValueChanged`; rejected values are reported and skipped.
    #[instrument(skip_all)]
    pub fn fill<I>(&mut self, values: I) -> FillReport
    where
        I: IntoIterator<Item = (FieldId, FieldValue)>,
    {
        let mut report = FillReport::default();
        let Some(scope) = self.session.as_ref().map(|s| s.scope().clone()) else {
            for (field, _) in values {
                report.rejected.push((field, AutofillError::NoActiveSession));
            }
            warn!(rejected = report.rejected.len(), "fill without an active session");
            return report;
        };

        for (field, value) in values {
            match self.apply_fill(&scope, &field, value) {
                Ok(applied) => {
                    self.emit(Notification::ValueChanged {
                        field: field.clone(),
                        value: applied,
                    });
                    report.applied.push(field);
                }
                Err(err) => {
                    warn!(field = %field, error = %err, "fill value rejected");
                    report.rejected.push((field, err));
                }
            }
        }

        if !report.applied.is_empty() {
            if let Some(session) = self.session.as_mut() {
                session.suggestion_used = true;
            }
        }
        debug!(
            applied = report.applied.len(),
            rejected = report.rejected.len(),
            "fill finished"
        );
        report
    }

    /// Commits the active session. No-op without one.
    #[instrument(skip_all, fields(source = %source))]
    pub fn submit(&mut self, source: SubmissionSource) -> Option<SessionReport> {
        if self.session.is_none() {
            trace!("submit without a session ignored");
            return None;
        }
        self.emit(Notification::Commit { source });
        let session = self.session.take()?;
        let report = session.finish(Some(source));
        self.report(&report);
        self.clear_focus();
        Some(report)
    }

    /// Abandons the active session. A tracker that never started a session
    /// emits and records nothing.
    #[instrument(skip_all)]
    pub fn navigate_away(&mut self) -> Option<SessionReport> {
        if self.session.is_none() {
            trace!("navigate away without a session");
            return None;
        }
        self.emit(Notification::Cancel);
        let session = self.session.take()?;
        let report = session.finish(None);
        self.report(&report);
        self.clear_focus();
        Some(report)
    }

    pub fn cancel_scope(&mut self) -> Option<SessionReport> {
        self.navigate_away()
    }

    /// Classifies a navigation as a submission or an abandonment. Leaving
    /// the document also forgets its fields.
    #[instrument(skip_all, fields(same_document = navigation.same_document))]
    pub fn on_navigate(&mut self, navigation: &Navigation) -> Option<SessionReport> {
        let verdict = self
            .session
            .as_ref()
            .map(|session| self.classifier.classify(navigation, session));
        let report = match verdict {
            Some(Some(source)) => self.submit(source),
            Some(None) => self.navigate_away(),
            None => None,
        };
        if !navigation.same_document {
            self.fields.clear();
        }
        report
    }

    /// Ends the document: abandons any session and forgets every field.
    pub fn reset_document(&mut self) -> Option<SessionReport> {
        let report = self.navigate_away();
        self.fields.clear();
        self.focused = None;
        report
    }

    fn scope_of_or_admit(&mut self, field: &FieldId) -> ScopeId {
        if let Some(known) = self.fields.get(field) {
            return known.scope.clone();
        }
        debug!(field = %field, "focus on unobserved field; admitting as formless");
        self.fields.insert(
            field.clone(),
            Field::from(FieldDescriptor::new(
                field.clone(),
                ScopeId::Formless,
                FieldKind::Other,
            )),
        );
        ScopeId::Formless
    }

    fn start_session(&mut self, field: &FieldId, scope: ScopeId) {
        let session = Session::start(scope.clone());
        info!(session = %session.id(), scope = %scope, "autofill session started");
        if self.policy.reporting.report_metrics {
            self.metrics.record_autofill_enabled(true);
        }
        self.session = Some(session);
        self.set_focus(field);
        self.emit(Notification::ViewEntered {
            field: field.clone(),
        });
        self.emit(Notification::SessionStarted { scope });
    }

    fn apply_fill(
        &mut self,
        scope: &ScopeId,
        field: &FieldId,
        value: FieldValue,
    ) -> Result<FieldValue, AutofillError> {
        let target = self
            .fields
            .get_mut(field)
            .ok_or_else(|| AutofillError::UnknownField(field.clone()))?;
        if target.scope != *scope {
            return Err(AutofillError::OutOfScope(field.clone()));
        }
        if !target.kind.is_autofillable() {
            return Err(AutofillError::NotAutofillable(field.clone()));
        }
        if value.kind() != target.kind {
            return Err(MismatchError {
                field: field.clone(),
                expected: target.kind,
                found: value.kind(),
            }
            .into());
        }
        target.value = value.clone();
        target.autofilled = true;
        Ok(value)
    }

    fn set_focus(&mut self, field: &FieldId) {
        if let Some(target) = self.fields.get_mut(field) {
            target.is_focused = true;
        }
        self.focused = Some(field.clone());
    }

    fn clear_focus(&mut self) -> Option<FieldId> {
        let previous = self.focused.take()?;
        if let Some(target) = self.fields.get_mut(&previous) {
            target.is_focused = false;
        }
        Some(previous)
    }

    fn emit(&self, notification: Notification) {
        debug!(%notification, "notify");
        self.observers.notify(&notification);
    }

    fn report(&self, report: &SessionReport) {
        info!(
            session = %report.session,
            outcome = %report.outcome,
            submission = ?report.submission,
            "autofill session ended"
        );
        if !self.policy.reporting.report_metrics {
            return;
        }
        self.metrics.record_session_outcome(report.outcome);
        self.metrics.record_suggestion_time(report.duration_ms);
        if let Some(source) = report.submission {
            self.metrics.record_submission_source(source);
        }
        if self.policy.reporting.report_user_changed_autofilled_field && report.suggestion_used {
            self.metrics
                .record_user_changed_autofilled_field(report.user_edited_after_suggestion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TrackerBuilder;
    use crate::testing::{RecordingMetrics, RecordingObserver};
    use autofill_policy_center::default_policy;

    fn tracker() -> (AutofillSessionTracker, Arc<RecordingObserver>, Arc<RecordingMetrics>) {
        let observer = Arc::new(RecordingObserver::default());
        let metrics = Arc::new(RecordingMetrics::default());
        let mut tracker = TrackerBuilder::new(default_policy())
            .with_observer(observer.clone())
            .with_metrics(metrics.clone())
            .build();
        tracker.observe_field(FieldDescriptor::text("name", ScopeId::form("f")));
        tracker.observe_field(FieldDescriptor::text("email", ScopeId::form("f")));
        tracker.observe_field(FieldDescriptor::new(
            "country",
            ScopeId::form("f"),
            FieldKind::List,
        ));
        (tracker, observer, metrics)
    }

    #[test]
    fn focus_tracks_field_flags() {
        let (mut tracker, _, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        assert!(tracker.field(&"name".into()).unwrap().is_focused);
        tracker.on_focus_enter(&"email".into());
        assert!(!tracker.field(&"name".into()).unwrap().is_focused);
        assert_eq!(tracker.focused_field(), Some(&FieldId::from("email")));
    }

    #[test]
    fn refocusing_same_field_emits_view_entered_only() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        observer.take();
        tracker.on_focus_enter(&"name".into());
        assert_eq!(observer.take(), vec![Notification::view_entered("name")]);
    }

    #[test]
    fn focus_exit_keeps_session() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        observer.take();
        tracker.on_focus_exit(&"email".into());
        assert!(observer.is_empty());
        tracker.on_focus_exit(&"name".into());
        assert_eq!(observer.take(), vec![Notification::view_exited("name")]);
        assert_eq!(tracker.state(), SessionState::Active);
        tracker.on_focus_enter(&"email".into());
        assert_eq!(observer.take(), vec![Notification::view_entered("email")]);
    }

    #[test]
    fn script_edit_updates_value_silently() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        observer.take();
        tracker.on_value_edit(&"name".into(), FieldValue::text("js"), InputOrigin::Script);
        assert!(observer.is_empty());
        assert_eq!(
            tracker.field(&"name".into()).unwrap().value,
            FieldValue::text("js")
        );
        assert!(!tracker.session().unwrap().user_edited_any_field());
    }

    #[test]
    fn mismatched_user_edit_is_dropped() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"country".into());
        observer.take();
        tracker.on_value_edit(&"country".into(), FieldValue::text("x"), InputOrigin::User);
        assert!(observer.is_empty());
        assert_eq!(
            tracker.field(&"country".into()).unwrap().value,
            FieldValue::List(0)
        );
    }

    #[test]
    fn unknown_focus_is_admitted_as_formless() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"search".into());
        assert_eq!(
            observer.take(),
            vec![
                Notification::Cancel,
                Notification::view_entered("search"),
                Notification::session_started(ScopeId::Formless),
            ]
        );
        assert_eq!(
            tracker.field(&"search".into()).unwrap().kind,
            FieldKind::Other
        );
    }

    #[test]
    fn submit_resets_to_idle_and_reports() {
        let (mut tracker, observer, metrics) = tracker();
        tracker.on_focus_enter(&"name".into());
        tracker.on_value_edit(&"name".into(), FieldValue::text("a"), InputOrigin::User);
        observer.take();
        let report = tracker.submit(SubmissionSource::FormSubmission).unwrap();
        assert_eq!(
            observer.take(),
            vec![Notification::Commit {
                source: SubmissionSource::FormSubmission
            }]
        );
        assert_eq!(report.final_state, SessionState::Committed);
        assert_eq!(tracker.state(), SessionState::Idle);
        assert!(tracker.focused_field().is_none());
        assert_eq!(
            metrics.outcomes(),
            vec![crate::SessionOutcome::NoSuggestionFormChangedSubmitted]
        );
        assert_eq!(metrics.sources(), vec![SubmissionSource::FormSubmission]);
        // no suggestion, so the autofilled-field metric stays silent
        assert!(metrics.changed_autofilled().is_empty());
    }

    #[test]
    fn submit_without_session_is_noop() {
        let (mut tracker, observer, metrics) = tracker();
        assert!(tracker.submit(SubmissionSource::FormSubmission).is_none());
        assert!(observer.is_empty());
        assert_eq!(metrics.total_reports(), 0);
    }

    #[test]
    fn reporting_can_be_disabled() {
        let mut policy = default_policy();
        policy.reporting.report_metrics = false;
        let metrics = Arc::new(RecordingMetrics::default());
        let mut tracker = TrackerBuilder::new(policy)
            .with_metrics(metrics.clone())
            .build();
        tracker.observe_field(FieldDescriptor::text("name", ScopeId::form("f")));
        tracker.on_focus_enter(&"name".into());
        assert!(tracker.navigate_away().is_some());
        assert_eq!(metrics.total_reports(), 0);
    }

    #[test]
    fn cross_document_navigation_forgets_fields() {
        let (mut tracker, _, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        let report = tracker
            .on_navigate(&Navigation::cross_document("https://example.com/next"))
            .unwrap();
        assert_eq!(report.final_state, SessionState::Cancelled);
        assert!(tracker.field(&"name".into()).is_none());
    }

    #[test]
    fn reset_document_clears_everything() {
        let (mut tracker, observer, _) = tracker();
        tracker.on_focus_enter(&"name".into());
        observer.take();
        assert!(tracker.reset_document().is_some());
        assert_eq!(observer.take(), vec![Notification::Cancel]);
        assert!(tracker.field(&"email".into()).is_none());
        assert!(tracker.reset_document().is_none());
        assert!(observer.is_empty());
    }
}
