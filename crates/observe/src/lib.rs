pub mod guard;
pub mod metrics;
pub mod policy;
pub mod tracing;

pub use guard::LabelMap;
pub use metrics::MetricsRegistry;
pub use policy::ObsPolicyView;
