//! Health-status metrics exporter
//!
//! Republishes the liveness of a monitored upstream service (Trivy,
//! Dependency-Track) as a Prometheus gauge family. Every scrape of
//! `/metrics` performs one synchronous probe of the upstream health
//! endpoint; there is no background polling loop.

#![warn(missing_docs)]

/// REST API handlers
pub mod api;

/// CLI interface
pub mod cli;

/// Shared definitions (error types)
pub mod common;

/// Upstream target resolution (environment, config file, default)
pub mod config;

/// Metrics exporter (registry, gauge family, scrape cycle)
pub mod exporter;

/// Logging initialization utilities
pub mod logging;

/// Upstream health probes
pub mod probe;

/// axum server startup and shutdown handling
pub mod server;

use std::sync::Arc;

/// Application state held by the serving layer.
///
/// The exporter is constructed once at startup and injected here; there is
/// no process-global metrics registry.
#[derive(Clone)]
pub struct AppState {
    /// Health exporter driving the scrape cycle
    pub exporter: Arc<exporter::HealthExporter>,
    /// Advertised URL of the metrics endpoint, shown on the root route
    pub metrics_url: String,
}
