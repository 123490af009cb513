use serde_json::Value;

use crate::errors::PolicyError;
use crate::model::{PolicySource, TrackerPolicy};

/// Applies one dotted-path override. Provenance is recorded only when the
/// value actually changes.
pub fn apply_override(
    policy: &mut TrackerPolicy,
    path: &str,
    value: &Value,
    source: PolicySource,
) -> Result<(), PolicyError> {
    let changed = match path {
        "session.enabled" => merge(&mut policy.session.enabled, to_bool(value)?),
        "session.skip_redundant_cancel" => {
            merge(&mut policy.session.skip_redundant_cancel, to_bool(value)?)
        }
        "session.navigation_classifier" => merge(
            &mut policy.session.navigation_classifier,
            to_str(value)?.parse()?,
        ),
        "reporting.report_metrics" => merge(&mut policy.reporting.report_metrics, to_bool(value)?),
        "reporting.report_user_changed_autofilled_field" => merge(
            &mut policy.reporting.report_user_changed_autofilled_field,
            to_bool(value)?,
        ),
        "bus.capacity" => {
            let capacity = to_usize(value)?;
            if capacity == 0 {
                return Err(PolicyError::InvalidValue(
                    "bus.capacity must be positive".into(),
                ));
            }
            merge(&mut policy.bus.capacity, capacity)
        }
        path => return Err(PolicyError::UnsupportedPath(path.to_string())),
    };
    if changed {
        policy.set_provenance(path, source);
        policy.rev += 1;
    }
    Ok(())
}

fn merge<T: PartialEq>(target: &mut T, candidate: T) -> bool {
    if *target == candidate {
        return false;
    }
    *target = candidate;
    true
}

fn to_usize(value: &Value) -> Result<usize, PolicyError> {
    value
        .as_u64()
        .map(|v| v as usize)
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected integer, got {value}")))
}

fn to_bool(value: &Value) -> Result<bool, PolicyError> {
    value
        .as_bool()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected bool, got {value}")))
}

fn to_str(value: &Value) -> Result<&str, PolicyError> {
    value
        .as_str()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected string, got {value}")))
}
