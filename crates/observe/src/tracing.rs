use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::policy::ObsPolicyView;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber once. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(policy: &ObsPolicyView, default_level: &str) {
    INIT.get_or_init(|| {
        if !policy.enable_tracing {
            return;
        }
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(std::io::stderr);
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
