use std::collections::BTreeMap;

use crate::policy::ObsPolicyView;

pub type LabelMap = BTreeMap<String, String>;

/// Drops empty labels, escapes values for the text exposition format and
/// truncates overly long values.
pub fn sanitize_labels(kv: LabelMap, policy: &ObsPolicyView) -> LabelMap {
    kv.into_iter()
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key, escape(&truncate(&value, policy.label_value_limit))))
        .collect()
}

fn truncate(raw: &str, max_chars: usize) -> String {
    if raw.chars().count() > max_chars {
        raw.chars().take(max_chars).collect()
    } else {
        raw.to_string()
    }
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_dropped() {
        let mut labels = LabelMap::new();
        labels.insert("outcome".into(), String::new());
        labels.insert("source".into(), "form_submission".into());
        let sanitized = sanitize_labels(labels, &ObsPolicyView::default());
        assert_eq!(sanitized.len(), 1);
        assert_eq!(sanitized.get("source").unwrap(), "form_submission");
    }

    #[test]
    fn quotes_are_escaped_and_long_values_truncated() {
        let policy = ObsPolicyView {
            label_value_limit: 4,
            ..ObsPolicyView::default()
        };
        let mut labels = LabelMap::new();
        labels.insert("a".into(), "x\"yz-long".into());
        let sanitized = sanitize_labels(labels, &policy);
        assert_eq!(sanitized.get("a").unwrap(), "x\\\"yz");
    }
}
