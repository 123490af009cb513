use autofill_observe::{LabelMap, MetricsRegistry};

use crate::model::SubmissionSource;
use crate::outcome::SessionOutcome;
use crate::ports::MetricsPort;

pub const SESSION_OUTCOME: &str = "autofill_session_outcome_total";
pub const SUBMISSION_SOURCE: &str = "autofill_submission_source_total";
pub const USER_CHANGED_AUTOFILLED_FIELD: &str = "autofill_user_changed_autofilled_field_total";
pub const AUTOFILL_ENABLED: &str = "autofill_enabled_total";
pub const SUGGESTION_TIME_SUM: &str = "autofill_suggestion_time_ms_sum";
pub const SUGGESTION_TIME_COUNT: &str = "autofill_suggestion_time_ms_count";

/// [`MetricsPort`] backed by a counter registry.
#[derive(Clone, Default)]
pub struct RegistryMetrics {
    registry: MetricsRegistry,
}

impl RegistryMetrics {
    pub fn new(registry: MetricsRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }
}

fn label(key: &str, value: &str) -> LabelMap {
    let mut labels = LabelMap::new();
    labels.insert(key.to_string(), value.to_string());
    labels
}

impl MetricsPort for RegistryMetrics {
    fn record_session_outcome(&self, outcome: SessionOutcome) {
        self.registry
            .inc(SESSION_OUTCOME, label("outcome", outcome.label()));
    }

    fn record_submission_source(&self, source: SubmissionSource) {
        self.registry
            .inc(SUBMISSION_SOURCE, label("source", source.as_str()));
    }

    fn record_user_changed_autofilled_field(&self, changed: bool) {
        self.registry.inc(
            USER_CHANGED_AUTOFILLED_FIELD,
            label("changed", if changed { "true" } else { "false" }),
        );
    }

    fn record_autofill_enabled(&self, enabled: bool) {
        self.registry.inc(
            AUTOFILL_ENABLED,
            label("enabled", if enabled { "true" } else { "false" }),
        );
    }

    fn record_suggestion_time(&self, millis: u64) {
        self.registry.add(SUGGESTION_TIME_SUM, LabelMap::new(), millis);
        self.registry.inc(SUGGESTION_TIME_COUNT, LabelMap::new());
    }
}
