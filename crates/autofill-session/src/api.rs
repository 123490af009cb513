use std::sync::Arc;

use autofill_policy_center::TrackerPolicy;

use crate::observers::{NotificationObserver, ObserverList};
use crate::ports::{classifier_for, MetricsPort, NullMetrics, SubmissionClassifier};
use crate::tracker::AutofillSessionTracker;

pub struct TrackerBuilder {
    policy: TrackerPolicy,
    observers: Option<Arc<ObserverList>>,
    pending: Vec<Arc<dyn NotificationObserver>>,
    metrics: Option<Arc<dyn MetricsPort>>,
    classifier: Option<Arc<dyn SubmissionClassifier>>,
}

impl TrackerBuilder {
    pub fn new(policy: TrackerPolicy) -> Self {
        Self {
            policy,
            observers: None,
            pending: Vec::new(),
            metrics: None,
            classifier: None,
        }
    }

    /// Shares an existing observer list instead of creating one.
    pub fn with_observer_list(mut self, list: Arc<ObserverList>) -> Self {
        self.observers = Some(list);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn NotificationObserver>) -> Self {
        self.pending.push(observer);
        self
    }

    pub fn with_metrics(mut self, port: Arc<dyn MetricsPort>) -> Self {
        self.metrics = Some(port);
        self
    }

    /// Overrides the classifier selected by the policy.
    pub fn with_classifier(mut self, classifier: Arc<dyn SubmissionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> AutofillSessionTracker {
        let observers = self.observers.unwrap_or_else(ObserverList::new);
        for observer in self.pending {
            observers.add(observer);
        }
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(NullMetrics) as Arc<dyn MetricsPort>);
        let classifier = self
            .classifier
            .unwrap_or_else(|| classifier_for(self.policy.session.navigation_classifier));
        AutofillSessionTracker::new(self.policy, observers, metrics, classifier)
    }
}
