//! Diagnostics setup
//!
//! Swallowed capture failures and pruning activity are reported through
//! `tracing`. The binary routes them to stderr so command output on stdout
//! stays clean.
//!
//! `RUST_LOG` takes precedence over the configured `log_filter`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to `default_filter`
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber; a second call is a no-op
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
