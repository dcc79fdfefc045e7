//! Tracing subscriber setup.
//!
//! Directives come from `BUG_RESOLVER_LOG`, then `RUST_LOG`, and default to
//! `info`. Logs go to stderr.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Must only be called once.
pub fn init_subscriber() {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(fmt_layer)
        .init();
}
