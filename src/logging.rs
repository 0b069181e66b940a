//! Structured logging setup, grounded on `src/logging.rs`'s
//! `setup_logging`, ported from `fern`/`log` to `tracing`/`tracing-subscriber`
//! to match the rest of this lineage's newer crates.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Defaults to `info`, overridable with
/// `RUST_LOG` — the one environment variable this binary reads.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    tracing::info!("logging initialized");
}
