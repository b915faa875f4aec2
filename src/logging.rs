//! Logging initialization utilities

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter comes from `EXPORTER_LOG_LEVEL`, then `RUST_LOG`, then
/// defaults to `info`.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let directives = std::env::var("EXPORTER_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .finish()
        .try_init()
}
