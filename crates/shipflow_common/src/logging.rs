//! Logging utilities for the Shipflow application.
//!
//! Initializes the tracing subscriber once per process; every binary entry
//! point calls [`init`] before doing anything else.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// The `RUST_LOG` environment variable still takes precedence for targets it
/// names explicitly.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("shipflow={}", level).parse().expect("valid directive"));

    // try_init so a second call (e.g. from tests) is a no-op
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
