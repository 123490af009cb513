use crate::model::{BusPolicy, ClassifierKind, ReportingPolicy, SessionPolicy, TrackerPolicy};

pub fn default_policy() -> TrackerPolicy {
    TrackerPolicy {
        rev: 1,
        session: SessionPolicy {
            enabled: true,
            skip_redundant_cancel: false,
            navigation_classifier: ClassifierKind::Never,
        },
        reporting: ReportingPolicy {
            report_metrics: true,
            report_user_changed_autofilled_field: true,
        },
        bus: BusPolicy { capacity: 1024 },
        provenance: Default::default(),
    }
}
