use std::path::PathBuf;

use anyhow::Result;
use autofill_observe::MetricsRegistry;
use autofill_policy_center::TrackerPolicy;
use clap::Args;
use serde::Serialize;

use super::output::{print_structured, OutputFormat};
use crate::scenario::{load_scenario, run_scenario, ReplayOutcome};

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Scenario file (.json, otherwise parsed as YAML)
    pub scenario: PathBuf,

    /// Append the Prometheus rendering of the recorded counters
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Serialize)]
struct ReplayPayload<'a> {
    #[serde(flatten)]
    outcome: &'a ReplayOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<String>,
}

pub fn cmd_replay(args: ReplayArgs, policy: TrackerPolicy, output: OutputFormat) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let registry = MetricsRegistry::default();
    let outcome = run_scenario(&scenario, policy, &registry);
    let metrics = args.metrics.then(|| registry.render_prometheus());

    let payload = ReplayPayload {
        outcome: &outcome,
        metrics,
    };
    if print_structured(output, &payload)? {
        return Ok(());
    }

    if let Some(name) = &outcome.scenario {
        println!("Scenario: {}", name);
        println!();
    }
    println!("Notifications ({}):", outcome.notifications.len());
    for (idx, notification) in outcome.notifications.iter().enumerate() {
        println!("  {:>3}. {}", idx + 1, notification);
    }

    for (idx, fill) in outcome.fills.iter().enumerate() {
        println!();
        println!(
            "Fill #{} → applied={}, rejected={}",
            idx + 1,
            fill.applied.len(),
            fill.rejected.len()
        );
        for reason in &fill.rejected {
            println!("  - {}", reason);
        }
    }

    println!();
    println!("Sessions ({}):", outcome.reports.len());
    for report in &outcome.reports {
        let submission = report
            .submission
            .map(|source| source.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} [{}] {:?} outcome={} ({}) submission={}",
            report.session,
            report.scope,
            report.final_state,
            report.outcome.label(),
            report.outcome.ordinal(),
            submission
        );
    }

    if let Some(text) = &payload.metrics {
        println!();
        print!("{}", text);
    }
    Ok(())
}
