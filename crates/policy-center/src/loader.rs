use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::apply::apply_override;
use crate::defaults::default_policy;
use crate::errors::PolicyError;
use crate::model::{PolicySource, TrackerPolicy};

const ENV_PREFIX: &str = "AUTOFILL_POLICY__";
const ENV_JSON: &str = "AUTOFILL_POLICY_OVERRIDE_JSON";

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub paths: Vec<PathBuf>,
    pub include_env: bool,
}

impl LoadOptions {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            include_env: true,
        }
    }
}

/// Defaults, then the file (when it exists), then environment overrides.
pub fn load_policy(path: Option<&Path>) -> Result<TrackerPolicy, PolicyError> {
    let options = LoadOptions {
        paths: path.map(Path::to_path_buf).into_iter().collect(),
        include_env: true,
    };
    load_policy_with_options(&options)
}

pub fn load_policy_with_options(options: &LoadOptions) -> Result<TrackerPolicy, PolicyError> {
    let mut policy = default_policy();
    bootstrap_builtin_provenance(&mut policy)?;

    for path in options.paths.iter().filter(|path| path.exists()) {
        let overlays = overlays_from_file(path)?;
        debug!(path = %path.display(), count = overlays.len(), "applying policy file");
        apply_overlays(&mut policy, overlays)?;
    }

    if options.include_env {
        let overlays = overlays_from_env()?;
        if !overlays.is_empty() {
            debug!(count = overlays.len(), "applying environment overrides");
        }
        apply_overlays(&mut policy, overlays)?;
    }

    Ok(policy)
}

struct PolicyOverlay {
    path: String,
    value: Value,
    source: PolicySource,
}

fn apply_overlays(
    policy: &mut TrackerPolicy,
    overlays: Vec<PolicyOverlay>,
) -> Result<(), PolicyError> {
    for overlay in overlays {
        apply_override(policy, &overlay.path, &overlay.value, overlay.source)?;
    }
    Ok(())
}

fn invalid(err: impl std::fmt::Display) -> PolicyError {
    PolicyError::Invalid(err.to_string())
}

fn overlays_from_file(path: &Path) -> Result<Vec<PolicyOverlay>, PolicyError> {
    let content = fs::read_to_string(path).map_err(|err| PolicyError::Io(err.to_string()))?;
    let document: serde_yaml::Value = serde_yaml::from_str(&content).map_err(invalid)?;
    if document.is_null() {
        return Ok(Vec::new());
    }
    let tree = serde_json::to_value(document).map_err(invalid)?;
    Ok(flatten_value(tree, None, PolicySource::File))
}

/// `AUTOFILL_POLICY__SESSION__SKIP_REDUNDANT_CANCEL` -> `session.skip_redundant_cancel`.
fn env_key_to_path(key: &str) -> Option<String> {
    let stripped = key.strip_prefix(ENV_PREFIX)?;
    let segments: Vec<String> = stripped
        .split("__")
        .filter(|segment| !segment.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    (!segments.is_empty()).then(|| segments.join("."))
}

fn overlays_from_env() -> Result<Vec<PolicyOverlay>, PolicyError> {
    let mut vars: Vec<(String, String)> = env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect();
    vars.sort();

    let mut overlays: Vec<PolicyOverlay> = vars
        .into_iter()
        .filter_map(|(key, raw)| {
            env_key_to_path(&key).map(|path| PolicyOverlay {
                path,
                value: parse_env_value(&raw),
                source: PolicySource::Env,
            })
        })
        .collect();

    match env::var(ENV_JSON) {
        Ok(raw) if !raw.trim().is_empty() => {
            let tree: Value = serde_json::from_str(&raw).map_err(invalid)?;
            overlays.extend(flatten_value(tree, None, PolicySource::Env));
        }
        _ => {}
    }
    Ok(overlays)
}

fn parse_env_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    // Bare words such as `same_document` are not JSON; keep them as strings.
    serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn flatten_value(value: Value, prefix: Option<String>, source: PolicySource) -> Vec<PolicyOverlay> {
    match (value, prefix) {
        (Value::Object(map), prefix) => map
            .into_iter()
            .flat_map(|(key, value)| {
                let segment = key.trim().to_ascii_lowercase();
                let path = match &prefix {
                    Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, segment),
                    _ => segment,
                };
                flatten_value(value, Some(path), source)
            })
            .collect(),
        (value, Some(path)) => vec![PolicyOverlay {
            path,
            value,
            source,
        }],
        (_, None) => Vec::new(),
    }
}

/// Marks every leaf of the built-in policy as `Builtin` so that each key
/// reports where its effective value came from.
fn bootstrap_builtin_provenance(policy: &mut TrackerPolicy) -> Result<(), PolicyError> {
    let sections = [
        ("session", serde_json::to_value(&policy.session).map_err(invalid)?),
        ("reporting", serde_json::to_value(&policy.reporting).map_err(invalid)?),
        ("bus", serde_json::to_value(&policy.bus).map_err(invalid)?),
    ];
    for (name, tree) in sections {
        for overlay in flatten_value(tree, Some(name.to_string()), PolicySource::Builtin) {
            policy.set_provenance(&overlay.path, overlay.source);
        }
    }
    Ok(())
}
