//! Tracing subscriber setup shared by the `wod` binary and the tests.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at `warn`
///
/// Events are written compactly to stderr; stdout carries only command
/// output, including `--json`. `RUST_LOG` takes precedence when set.
pub fn init() {
    init_with_level("warn")
}

/// Install the global subscriber with `default_level` as the filter
/// used when `RUST_LOG` is unset
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Debug-level subscriber routed through the test harness; safe to call
/// from every test
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
