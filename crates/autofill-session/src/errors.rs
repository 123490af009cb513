use thiserror::Error;

use autofill_core_types::{CoreError, FieldId};

use crate::model::FieldKind;

/// A filled value whose kind does not match the field it targets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{found} value cannot be applied to {expected} field {field}")]
pub struct MismatchError {
    pub field: FieldId,
    pub expected: FieldKind,
    pub found: FieldKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutofillError {
    #[error(transparent)]
    Mismatch(#[from] MismatchError),
    #[error("unknown field {0}")]
    UnknownField(FieldId),
    #[error("field {0} is outside the active session scope")]
    OutOfScope(FieldId),
    #[error("field {0} cannot be autofilled")]
    NotAutofillable(FieldId),
    #[error("no active autofill session")]
    NoActiveSession,
}

impl From<AutofillError> for CoreError {
    fn from(err: AutofillError) -> Self {
        CoreError::new(err.to_string())
    }
}
