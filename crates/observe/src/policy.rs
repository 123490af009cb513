use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsPolicyView {
    pub enable_metrics: bool,
    pub enable_tracing: bool,
    pub series_limit: usize,
    pub label_value_limit: usize,
}

impl Default for ObsPolicyView {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            enable_tracing: true,
            series_limit: 256,
            label_value_limit: 64,
        }
    }
}
