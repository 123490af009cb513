//! Recording doubles for the observer and metrics seams.

use parking_lot::Mutex;

use crate::events::Notification;
use crate::model::SubmissionSource;
use crate::observers::NotificationObserver;
use crate::outcome::SessionOutcome;
use crate::ports::MetricsPort;

#[derive(Debug, Default)]
pub struct RecordingObserver {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingObserver {
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    /// Returns everything recorded so far and clears the log.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock())
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, name: &str) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.name() == name)
            .count()
    }
}

impl NotificationObserver for RecordingObserver {
    fn on_notification(&self, notification: &Notification) {
        self.notifications.lock().push(notification.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingMetrics {
    outcomes: Mutex<Vec<SessionOutcome>>,
    sources: Mutex<Vec<SubmissionSource>>,
    changed_autofilled: Mutex<Vec<bool>>,
    enabled: Mutex<Vec<bool>>,
    suggestion_times: Mutex<Vec<u64>>,
}

impl RecordingMetrics {
    pub fn outcomes(&self) -> Vec<SessionOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn sources(&self) -> Vec<SubmissionSource> {
        self.sources.lock().clone()
    }

    pub fn changed_autofilled(&self) -> Vec<bool> {
        self.changed_autofilled.lock().clone()
    }

    pub fn enabled(&self) -> Vec<bool> {
        self.enabled.lock().clone()
    }

    pub fn suggestion_times(&self) -> Vec<u64> {
        self.suggestion_times.lock().clone()
    }

    pub fn total_reports(&self) -> usize {
        self.outcomes.lock().len()
            + self.sources.lock().len()
            + self.changed_autofilled.lock().len()
            + self.enabled.lock().len()
            + self.suggestion_times.lock().len()
    }
}

impl MetricsPort for RecordingMetrics {
    fn record_session_outcome(&self, outcome: SessionOutcome) {
        self.outcomes.lock().push(outcome);
    }

    fn record_submission_source(&self, source: SubmissionSource) {
        self.sources.lock().push(source);
    }

    fn record_user_changed_autofilled_field(&self, changed: bool) {
        self.changed_autofilled.lock().push(changed);
    }

    fn record_autofill_enabled(&self, enabled: bool) {
        self.enabled.lock().push(enabled);
    }

    fn record_suggestion_time(&self, millis: u64) {
        self.suggestion_times.lock().push(millis);
    }
}
