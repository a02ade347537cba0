pub mod build_info;

use std::{env, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "spendcast_core=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `RUST_LOG` replaces the default
/// `spendcast_core=info` directive when set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(log_filter(directives.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Builds the filter from `RUST_LOG`-style directives, falling back to the defaults
/// when they are missing, blank or unparseable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
