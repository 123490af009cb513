use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the autofill crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{message}")]
    Message { message: String },
}

impl CoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Identifies one logical autofill session.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque field identifier, stable within one document.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(transparent))]
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl From<&str> for FieldId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for FieldId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of fields treated as one form for session-boundary purposes.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "snake_case"))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScopeId {
    Form(String),
    /// Synthetic scope for controls outside any form element.
    Formless,
}

impl ScopeId {
    pub fn form(name: impl Into<String>) -> Self {
        Self::Form(name.into())
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        ScopeId::Formless
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Form(name) => write!(f, "form:{}", name),
            ScopeId::Formless => f.write_str("formless"),
        }
    }
}
