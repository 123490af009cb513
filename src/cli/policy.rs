use anyhow::{anyhow, Result};
use autofill_policy_center::{apply_override, PolicySource, TrackerPolicy};
use clap::Args;

use super::output::{print_structured, OutputFormat};

const PATHS: [&str; 6] = [
    "session.enabled",
    "session.skip_redundant_cancel",
    "session.navigation_classifier",
    "reporting.report_metrics",
    "reporting.report_user_changed_autofilled_field",
    "bus.capacity",
];

#[derive(Args, Clone, Debug)]
pub struct PolicyArgs {
    /// Extra override applied before printing, as `path=json` (repeatable)
    #[arg(long = "set", value_name = "PATH=JSON")]
    pub overrides: Vec<String>,
}

pub fn cmd_policy(args: PolicyArgs, policy: &TrackerPolicy, output: OutputFormat) -> Result<()> {
    let mut policy = policy.clone();
    for raw in &args.overrides {
        let (path, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("override '{}' must look like path=value", raw))?;
        let value: serde_json::Value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        apply_override(&mut policy, path.trim(), &value, PolicySource::Cli)?;
    }

    if print_structured(output, &policy)? {
        return Ok(());
    }

    println!("Policy Revision: {}", policy.rev);
    println!();
    let values = [
        policy.session.enabled.to_string(),
        policy.session.skip_redundant_cancel.to_string(),
        policy.session.navigation_classifier.as_str().to_string(),
        policy.reporting.report_metrics.to_string(),
        policy.reporting.report_user_changed_autofilled_field.to_string(),
        policy.bus.capacity.to_string(),
    ];
    for (path, value) in PATHS.iter().zip(values.iter()) {
        let source = policy
            .source_of(path)
            .map(|source| format!("{:?}", source).to_lowercase())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<48} {:<14} ({})", path, value, source);
    }
    Ok(())
}
