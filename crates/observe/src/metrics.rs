use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::guard::{sanitize_labels, LabelMap};
use crate::policy::ObsPolicyView;

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct MetricKey {
    name: &'static str,
    labels: Vec<(String, String)>,
}

impl MetricKey {
    fn new(name: &'static str, labels: LabelMap, policy: &ObsPolicyView) -> Self {
        // BTreeMap iteration keeps labels sorted by key
        let labels = sanitize_labels(labels, policy).into_iter().collect();
        Self { name, labels }
    }

    fn fmt_labels(&self) -> String {
        if self.labels.is_empty() {
            String::new()
        } else {
            let inner = self
                .labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, v))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{}}}", inner)
        }
    }
}

/// Counter registry handed explicitly to whoever records into it.
#[derive(Clone)]
pub struct MetricsRegistry {
    policy: ObsPolicyView,
    counters: Arc<Mutex<HashMap<MetricKey, u64>>>,
}

impl MetricsRegistry {
    pub fn new(policy: ObsPolicyView) -> Self {
        Self {
            policy,
            counters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn policy(&self) -> &ObsPolicyView {
        &self.policy
    }

    pub fn inc(&self, name: &'static str, labels: LabelMap) {
        self.add(name, labels, 1);
    }

    pub fn add(&self, name: &'static str, labels: LabelMap, delta: u64) {
        if !self.policy.enable_metrics {
            return;
        }
        let key = MetricKey::new(name, labels, &self.policy);
        let mut map = self.counters.lock();
        if !map.contains_key(&key) && map.len() >= self.policy.series_limit {
            warn!(metric = name, "series limit reached; dropping sample");
            return;
        }
        *map.entry(key).or_insert(0) += delta;
    }

    /// Sum of a counter across every label combination matching `filter`.
    pub fn counter_value(&self, name: &str, filter: &[(&str, &str)]) -> u64 {
        self.counters
            .lock()
            .iter()
            .filter(|(key, _)| key.name == name)
            .filter(|(key, _)| {
                filter
                    .iter()
                    .all(|(k, v)| key.labels.iter().any(|(lk, lv)| lk == k && lv == v))
            })
            .map(|(_, value)| *value)
            .sum()
    }

    pub fn render_prometheus(&self) -> String {
        let map = self.counters.lock();
        let mut lines: Vec<String> = map
            .iter()
            .map(|(key, value)| format!("{}{} {}", key.name, key.fmt_labels(), value))
            .collect();
        lines.sort();
        let mut output = lines.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new(ObsPolicyView::default())
    }
}
