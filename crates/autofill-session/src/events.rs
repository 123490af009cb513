use std::fmt;

use autofill_core_types::{FieldId, ScopeId};
use serde::Serialize;

use crate::model::{FieldValue, SubmissionSource};

/// Lifecycle notification delivered to observers, in emission order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    ViewEntered { field: FieldId },
    ViewExited { field: FieldId },
    ValueChanged { field: FieldId, value: FieldValue },
    SessionStarted { scope: ScopeId },
    Cancel,
    Commit { source: SubmissionSource },
}

impl Notification {
    pub fn view_entered(field: impl Into<FieldId>) -> Self {
        Notification::ViewEntered {
            field: field.into(),
        }
    }

    pub fn view_exited(field: impl Into<FieldId>) -> Self {
        Notification::ViewExited {
            field: field.into(),
        }
    }

    pub fn value_changed(field: impl Into<FieldId>, value: FieldValue) -> Self {
        Notification::ValueChanged {
            field: field.into(),
            value,
        }
    }

    pub fn session_started(scope: ScopeId) -> Self {
        Notification::SessionStarted { scope }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Notification::ViewEntered { .. } => "view_entered",
            Notification::ViewExited { .. } => "view_exited",
            Notification::ValueChanged { .. } => "value_changed",
            Notification::SessionStarted { .. } => "session_started",
            Notification::Cancel => "cancel",
            Notification::Commit { .. } => "commit",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::ViewEntered { field } => write!(f, "ViewEntered({})", field),
            Notification::ViewExited { field } => write!(f, "ViewExited({})", field),
            Notification::ValueChanged { field, value } => {
                write!(f, "ValueChanged({}, {})", field, value)
            }
            Notification::SessionStarted { scope } => write!(f, "SessionStarted({})", scope),
            Notification::Cancel => f.write_str("Cancel"),
            Notification::Commit { source } => write!(f, "Commit({})", source),
        }
    }
}
