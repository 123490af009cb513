use std::fmt;

use autofill_core_types::{FieldId, ScopeId};
use serde::{Deserialize, Serialize};

/// Declared kind of a form control.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Toggle,
    List,
    /// Anything the autofill service cannot write to.
    Other,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Toggle => "toggle",
            FieldKind::List => "list",
            FieldKind::Other => "other",
        }
    }

    /// Whether a user edit carrying `value` is consistent with this kind.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(self, FieldKind::Other) || value.kind() == *self
    }

    pub fn is_autofillable(&self) -> bool {
        !matches!(self, FieldKind::Other)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
    /// Selected option index.
    List(usize),
}

impl FieldValue {
    pub fn text(raw: impl Into<String>) -> Self {
        FieldValue::Text(raw.into())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Toggle(_) => FieldKind::Toggle,
            FieldValue::List(_) => FieldKind::List,
        }
    }

    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Other => FieldValue::Text(String::new()),
            FieldKind::Toggle => FieldValue::Toggle(false),
            FieldKind::List => FieldValue::List(0),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{:?}", text),
            FieldValue::Toggle(on) => write!(f, "{}", on),
            FieldValue::List(index) => write!(f, "#{}", index),
        }
    }
}

/// How a caller describes a control before or while it is first observed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    #[serde(default)]
    pub scope: ScopeId,
    pub kind: FieldKind,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<FieldId>, scope: ScopeId, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            scope,
            kind,
            value: None,
        }
    }

    pub fn text(id: impl Into<FieldId>, scope: ScopeId) -> Self {
        Self::new(id, scope, FieldKind::Text)
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub id: FieldId,
    pub scope: ScopeId,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub is_focused: bool,
    /// Set when the current value was written by a fill.
    pub autofilled: bool,
}

impl From<FieldDescriptor> for Field {
    fn from(desc: FieldDescriptor) -> Self {
        let value = desc
            .value
            .filter(|value| desc.kind.accepts(value))
            .unwrap_or_else(|| FieldValue::empty_for(desc.kind));
        Self {
            id: desc.id,
            scope: desc.scope,
            kind: desc.kind,
            value,
            is_focused: false,
            autofilled: false,
        }
    }
}

/// Who changed a value. Supplied by the caller, never inferred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOrigin {
    #[default]
    User,
    Script,
}

/// Why a session was committed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionSource {
    FormSubmission,
    ProbablyFormSubmitted,
    SameDocumentNavigation,
    XhrSucceeded,
    FrameDetached,
    DomMutationAfterXhr,
}

impl SubmissionSource {
    pub const ALL: [SubmissionSource; 6] = [
        SubmissionSource::FormSubmission,
        SubmissionSource::ProbablyFormSubmitted,
        SubmissionSource::SameDocumentNavigation,
        SubmissionSource::XhrSucceeded,
        SubmissionSource::FrameDetached,
        SubmissionSource::DomMutationAfterXhr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionSource::FormSubmission => "form_submission",
            SubmissionSource::ProbablyFormSubmitted => "probably_form_submitted",
            SubmissionSource::SameDocumentNavigation => "same_document_navigation",
            SubmissionSource::XhrSucceeded => "xhr_succeeded",
            SubmissionSource::FrameDetached => "frame_detached",
            SubmissionSource::DomMutationAfterXhr => "dom_mutation_after_xhr",
        }
    }
}

impl fmt::Display for SubmissionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(default)]
    pub same_document: bool,
    #[serde(default)]
    pub renderer_initiated: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl Navigation {
    pub fn cross_document(url: impl Into<String>) -> Self {
        Self {
            same_document: false,
            renderer_initiated: false,
            url: Some(url.into()),
        }
    }

    pub fn same_document(url: impl Into<String>) -> Self {
        Self {
            same_document: true,
            renderer_initiated: true,
            url: Some(url.into()),
        }
    }
}

/// One observed stimulus, in observation order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    FocusEnter(FieldId),
    FocusExit(FieldId),
    ValueEdit {
        field: FieldId,
        value: FieldValue,
        origin: InputOrigin,
    },
    Submit(SubmissionSource),
    Navigate(Navigation),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Active,
    Committed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_kind_accepts_any_value_but_is_not_autofillable() {
        assert!(FieldKind::Other.accepts(&FieldValue::Toggle(true)));
        assert!(!FieldKind::Other.is_autofillable());
        assert!(!FieldKind::List.accepts(&FieldValue::Toggle(true)));
    }

    #[test]
    fn descriptor_value_of_wrong_kind_is_replaced() {
        let field = Field::from(
            FieldDescriptor::new("agree", ScopeId::Formless, FieldKind::Toggle)
                .with_value(FieldValue::text("yes")),
        );
        assert_eq!(field.value, FieldValue::Toggle(false));
    }

    #[test]
    fn submission_source_serialises_snake_case() {
        let raw = serde_json::to_string(&SubmissionSource::ProbablyFormSubmitted).unwrap();
        assert_eq!(raw, "\"probably_form_submitted\"");
    }
}
