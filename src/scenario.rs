//! Scenario files: a page's fields plus an ordered list of interaction steps.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use autofill_core_types::FieldId;
use autofill_observe::MetricsRegistry;
use autofill_policy_center::TrackerPolicy;
use autofill_session::metrics::RegistryMetrics;
use autofill_session::testing::RecordingObserver;
use autofill_session::{
    FieldDescriptor, FieldValue, FillReport, InputOrigin, Navigation, Notification, SessionReport,
    SubmissionSource, TrackerBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Focus(FieldId),
    Blur(FieldId),
    Edit {
        field: FieldId,
        value: FieldValue,
        #[serde(default)]
        origin: InputOrigin,
    },
    Fill(Vec<FillEntry>),
    Submit(SubmissionSource),
    Navigate(Navigation),
    Cancel,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FillEntry {
    pub field: FieldId,
    pub value: FieldValue,
}

#[derive(Clone, Debug, Serialize)]
pub struct FillSummary {
    pub applied: Vec<FieldId>,
    pub rejected: Vec<String>,
}

impl From<FillReport> for FillSummary {
    fn from(report: FillReport) -> Self {
        Self {
            applied: report.applied,
            rejected: report
                .rejected
                .into_iter()
                .map(|(_, err)| err.to_string())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplayOutcome {
    pub scenario: Option<String>,
    pub notifications: Vec<Notification>,
    pub reports: Vec<SessionReport>,
    pub fills: Vec<FillSummary>,
}

/// Reads a scenario, choosing the parser by file extension.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let scenario = if is_json {
        serde_json::from_str(&content).context("failed to parse JSON scenario")?
    } else {
        serde_yaml::from_str(&content).context("failed to parse YAML scenario")?
    };
    Ok(scenario)
}

/// Runs every step through a fresh tracker. Sessions still active at the
/// end are abandoned so their outcome is reported.
pub fn run_scenario(
    scenario: &Scenario,
    policy: TrackerPolicy,
    registry: &MetricsRegistry,
) -> ReplayOutcome {
    let recorder = Arc::new(RecordingObserver::default());
    let mut tracker = TrackerBuilder::new(policy)
        .with_observer(recorder.clone())
        .with_metrics(Arc::new(RegistryMetrics::new(registry.clone())))
        .build();

    for field in &scenario.fields {
        tracker.observe_field(field.clone());
    }

    let mut reports = Vec::new();
    let mut fills = Vec::new();
    for (index, step) in scenario.steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        let report = match step {
            Step::Focus(field) => {
                tracker.on_focus_enter(field);
                None
            }
            Step::Blur(field) => {
                tracker.on_focus_exit(field);
                None
            }
            Step::Edit {
                field,
                value,
                origin,
            } => {
                tracker.on_value_edit(field, value.clone(), *origin);
                None
            }
            Step::Fill(entries) => {
                let fill = tracker.fill(
                    entries
                        .iter()
                        .map(|entry| (entry.field.clone(), entry.value.clone())),
                );
                fills.push(FillSummary::from(fill));
                None
            }
            Step::Submit(source) => tracker.submit(*source),
            Step::Navigate(navigation) => tracker.on_navigate(navigation),
            Step::Cancel => tracker.cancel_scope(),
        };
        reports.extend(report);
    }
    reports.extend(tracker.reset_document());

    info!(
        steps = scenario.steps.len(),
        notifications = recorder.len(),
        sessions = reports.len(),
        "scenario replayed"
    );
    ReplayOutcome {
        scenario: scenario.name.clone(),
        notifications: recorder.take(),
        reports,
        fills,
    }
}
