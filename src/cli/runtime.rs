use std::path::Path;

use anyhow::{Context, Result};
use autofill_observe::tracing::init_tracing;
use autofill_observe::ObsPolicyView;
use autofill_policy_center::{load_policy, TrackerPolicy};
use tracing::info;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse::<tracing::Level>().context("Invalid log level")?
    };
    init_tracing(&ObsPolicyView::default(), &level.to_string().to_lowercase());
    Ok(())
}

pub fn load_policy_for(path: Option<&Path>) -> Result<TrackerPolicy> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("policy file {} does not exist", path.display());
        }
    }
    let policy = load_policy(path).with_context(|| match path {
        Some(path) => format!("failed to load policy from {}", path.display()),
        None => "failed to load built-in policy".to_string(),
    })?;
    info!(rev = policy.rev, "tracker policy loaded");
    Ok(policy)
}
