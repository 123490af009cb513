use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

/// Effective configuration of one tracker instance.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrackerPolicy {
    pub rev: u64,
    pub session: SessionPolicy,
    pub reporting: ReportingPolicy,
    pub bus: BusPolicy,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provenance: HashMap<String, PolicyProvenance>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionPolicy {
    /// When off, focus never starts a session; each would-be start is
    /// reported as a disabled trigger.
    pub enabled: bool,
    /// Suppress every implicit `Cancel`: the one preceding a fresh session
    /// start and the one ending a session replaced by a new scope. Newer
    /// platform versions need neither.
    pub skip_redundant_cancel: bool,
    pub navigation_classifier: ClassifierKind,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_redundant_cancel: false,
            navigation_classifier: ClassifierKind::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ReportingPolicy {
    pub report_metrics: bool,
    pub report_user_changed_autofilled_field: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct BusPolicy {
    pub capacity: usize,
}

/// Which heuristic turns a navigation into a probable form submission.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    Never,
    SameDocument,
    RendererInitiated,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Never => "never",
            ClassifierKind::SameDocument => "same_document",
            ClassifierKind::RendererInitiated => "renderer_initiated",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierKind {
    type Err = PolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(ClassifierKind::Never),
            "same_document" | "same-document" => Ok(ClassifierKind::SameDocument),
            "renderer_initiated" | "renderer-initiated" => Ok(ClassifierKind::RendererInitiated),
            other => Err(PolicyError::InvalidValue(format!(
                "unknown navigation classifier '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyProvenance {
    pub path: String,
    pub source: PolicySource,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicySource {
    Builtin,
    File,
    Env,
    Cli,
}

impl TrackerPolicy {
    pub fn set_provenance(&mut self, path: &str, source: PolicySource) {
        self.provenance.insert(
            path.to_string(),
            PolicyProvenance {
                path: path.to_string(),
                source,
            },
        );
    }

    pub fn source_of(&self, path: &str) -> Option<PolicySource> {
        self.provenance.get(path).map(|p| p.source)
    }
}
