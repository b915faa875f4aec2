//! Upstream health probes
//!
//! One probe function per exporter variant, dispatched through
//! [`ExporterKind`]. Each probe issues exactly one GET request per call;
//! there are no retries and no circuit breaking. Any transport failure,
//! timeout, or unexpected response degrades to "down" instead of raising.

mod actuator;
mod package;
mod plain;

use std::time::Duration;

use clap::ValueEnum;
use reqwest::Client;

use crate::common::error::ExporterResult;
use crate::config::ServiceTarget;

pub use actuator::probe_actuator;
pub use package::probe_package;
pub use plain::probe_plain;

/// Default probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Package URL queried by the package-lookup variant when none is
/// configured.
pub const DEFAULT_PROBE_PURL: &str = "pkg:pypi/requests@2.31.0";

/// Exporter variant, selected at startup by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExporterKind {
    /// Plaintext `/healthz` probe against a Trivy server
    Trivy,
    /// Actuator JSON health probe against a Dependency-Track server
    Track,
    /// Package-lookup probe against the Dependency-Track API
    TrackPackage,
}

impl ExporterKind {
    /// Service name used for logging and as the config-file key.
    pub fn service(&self) -> &'static str {
        match self {
            Self::Trivy => "trivy",
            Self::Track | Self::TrackPackage => "track",
        }
    }

    /// Environment variable that overrides the upstream base URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Trivy => "TRIVY_SERVER_URL",
            Self::Track | Self::TrackPackage => "TRACK_SERVER_URL",
        }
    }

    /// Name of the emitted gauge family.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::Trivy => "trivy_health_status",
            Self::Track | Self::TrackPackage => "track_health_status",
        }
    }

    /// Help text of the emitted gauge family.
    pub fn metric_help(&self) -> &'static str {
        match self {
            Self::Trivy => "Health of the Trivy server (1 = up, 0 = down)",
            Self::Track | Self::TrackPackage => {
                "Health of the Dependency-Track server (1 = up, 0 = down)"
            }
        }
    }

    /// `service` label value carried by the status sample.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Trivy => "trivy",
            Self::Track => "UP",
            Self::TrackPackage => "track",
        }
    }
}

/// Disk usage reported by the structured health endpoint, in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    /// Total disk space in GB
    pub total_gb: f64,
    /// Free disk space in GB
    pub free_gb: f64,
}

/// Outcome of a single probe attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Whether the upstream answered healthy
    pub up: bool,
    /// Disk usage, when the response carried it
    pub disk: Option<DiskUsage>,
}

impl Observation {
    /// Healthy outcome without disk details.
    pub fn healthy() -> Self {
        Self {
            up: true,
            disk: None,
        }
    }

    /// Unhealthy outcome.
    pub fn unhealthy() -> Self {
        Self {
            up: false,
            disk: None,
        }
    }
}

/// Latest known upstream health, mutated only by the probe.
///
/// Disk fields keep their last successfully observed values when a later
/// check fails or omits them; only `up` is reset on every check.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthState {
    /// Whether the last check found the upstream healthy
    pub up: bool,
    /// Last successfully observed disk usage
    pub disk: Option<DiskUsage>,
}

impl HealthState {
    /// Fold one probe outcome into the state.
    pub fn apply(&mut self, observation: &Observation) {
        self.up = observation.up;
        if let Some(disk) = observation.disk {
            self.disk = Some(disk);
        }
    }
}

/// Probe settings shared by all variants.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// Package URL queried by the package-lookup variant
    pub purl: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            purl: DEFAULT_PROBE_PURL.to_string(),
        }
    }
}

/// Health prober for one upstream target.
///
/// Holds the HTTP client and the resolved base URL; dispatches to the
/// variant-specific probe function on every [`check`](Self::check).
pub struct Prober {
    kind: ExporterKind,
    client: Client,
    base_url: String,
    purl: String,
}

impl Prober {
    /// Build the prober and its HTTP client.
    ///
    /// Certificate validation is disabled: targets sit on a trusted
    /// internal network and commonly serve self-signed certificates.
    /// Deployments that need strict TLS must front the exporter with a
    /// verifying proxy.
    pub fn new(
        kind: ExporterKind,
        target: &ServiceTarget,
        settings: &ProbeSettings,
    ) -> ExporterResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            kind,
            client,
            base_url: target.base_url.clone(),
            purl: settings.purl.clone(),
        })
    }

    /// Perform one probe attempt against the upstream.
    pub async fn check(&self) -> Observation {
        match self.kind {
            ExporterKind::Trivy => probe_plain(&self.client, &self.base_url).await,
            ExporterKind::Track => probe_actuator(&self.client, &self.base_url).await,
            ExporterKind::TrackPackage => {
                probe_package(&self.client, &self.base_url, &self.purl).await
            }
        }
    }
}
