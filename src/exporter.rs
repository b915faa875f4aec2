//! Metrics exporter
//!
//! Owns a dedicated Prometheus registry and the `<service>_health_status`
//! gauge family. Every scrape runs one upstream probe, folds the outcome
//! into the shared [`HealthState`], refreshes the gauge samples, and
//! encodes the registry in text exposition format. The whole cycle runs
//! under one mutex, so concurrent scrapes serialize their checks and never
//! read a half-updated state.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tokio::sync::Mutex;
use tracing::debug;

use crate::common::error::ExporterResult;
use crate::config::ServiceTarget;
use crate::probe::{ExporterKind, HealthState, ProbeSettings, Prober};

/// `service` label value of the total-disk sample.
const DISK_TOTAL_LABEL: &str = "disk_total_GB";
/// `service` label value of the free-disk sample.
const DISK_FREE_LABEL: &str = "disk_free_GB";

/// Health exporter for one upstream service.
///
/// Constructed once at startup and injected into the serving layer; the
/// registry is owned here, not process-global.
pub struct HealthExporter {
    kind: ExporterKind,
    prober: Prober,
    state: Mutex<HealthState>,
    registry: Registry,
    gauge: GaugeVec,
}

impl HealthExporter {
    /// Build the exporter and register its gauge family.
    pub fn new(
        kind: ExporterKind,
        target: &ServiceTarget,
        settings: &ProbeSettings,
    ) -> ExporterResult<Self> {
        let prober = Prober::new(kind, target, settings)?;

        let registry = Registry::new();
        let gauge = GaugeVec::new(
            Opts::new(kind.metric_name(), kind.metric_help()),
            &["service"],
        )?;
        registry.register(Box::new(gauge.clone()))?;

        Ok(Self {
            kind,
            prober,
            state: Mutex::new(HealthState::default()),
            registry,
            gauge,
        })
    }

    /// Run one check-and-encode cycle and return the exposition body.
    ///
    /// Upstream failures never surface here; they are already folded into
    /// the gauge value by the probe. An `Err` means the metrics themselves
    /// could not be encoded.
    pub async fn scrape(&self) -> ExporterResult<String> {
        let mut state = self.state.lock().await;

        let observation = self.prober.check().await;
        state.apply(&observation);
        debug!(
            service = self.kind.service(),
            up = state.up,
            "Health probe completed"
        );

        self.set_samples(&state);
        self.encode()
    }

    /// Latest state, read under the same lock as the scrape cycle.
    pub async fn state(&self) -> HealthState {
        *self.state.lock().await
    }

    /// Content type of the exposition format.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    fn set_samples(&self, state: &HealthState) {
        let status = if state.up { 1.0 } else { 0.0 };
        self.gauge
            .with_label_values(&[self.kind.status_label()])
            .set(status);

        if let Some(disk) = state.disk {
            self.gauge
                .with_label_values(&[DISK_TOTAL_LABEL])
                .set(disk.total_gb);
            self.gauge
                .with_label_values(&[DISK_FREE_LABEL])
                .set(disk.free_gb);
        }
    }

    fn encode(&self) -> ExporterResult<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSource;

    fn unreachable_target() -> ServiceTarget {
        // Nothing listens on the discard port; the probe fails fast with
        // connection refused.
        ServiceTarget {
            base_url: "http://127.0.0.1:9".to_string(),
            source: TargetSource::Default,
        }
    }

    #[tokio::test]
    async fn test_scrape_reports_down_for_unreachable_upstream() {
        let exporter = HealthExporter::new(
            ExporterKind::Trivy,
            &unreachable_target(),
            &ProbeSettings::default(),
        )
        .unwrap();

        let body = exporter.scrape().await.unwrap();

        assert!(body.contains("# TYPE trivy_health_status gauge"));
        assert!(body.contains("trivy_health_status{service=\"trivy\"} 0"));
        assert!(!exporter.state().await.up);
    }

    #[tokio::test]
    async fn test_track_scrape_uses_up_label() {
        let exporter = HealthExporter::new(
            ExporterKind::Track,
            &unreachable_target(),
            &ProbeSettings::default(),
        )
        .unwrap();

        let body = exporter.scrape().await.unwrap();

        assert!(body.contains("track_health_status{service=\"UP\"} 0"));
        // No disk has ever been observed, so no disk samples are emitted.
        assert!(!body.contains(DISK_TOTAL_LABEL));
        assert!(!body.contains(DISK_FREE_LABEL));
    }

    #[test]
    fn test_content_type_is_text_exposition() {
        let exporter = HealthExporter::new(
            ExporterKind::Trivy,
            &unreachable_target(),
            &ProbeSettings::default(),
        )
        .unwrap();

        assert!(exporter.content_type().starts_with("text/plain"));
    }
}
