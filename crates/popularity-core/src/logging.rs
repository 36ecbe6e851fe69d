// File: crates/popularity-core/src/logging.rs
// Summary: tracing subscriber setup shared by the binaries.
//
// Levels used across the crate:
// - TRACE: per-pointer-event state changes and lookups
// - DEBUG: chart construction, feed sources, pollster selection
// - INFO:  feeds loaded, files written
// - WARN/ERROR: skipped charts and failed loads (binaries)
//
// `RUST_LOG` overrides the default level, e.g. `RUST_LOG=popularity_core::interaction=trace`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber at `info`, unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    init_logging_with_level("info")
}

/// Install a global fmt subscriber at `level`, unless `RUST_LOG` says otherwise.
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
