//! Structured actuator health probe
//!
//! Dependency-Track exposes `GET /actuator/health/custom` returning JSON
//! with a top-level `status` field and, optionally, nested disk-space
//! details in bytes:
//!
//! ```json
//! {"status":"UP","components":{"diskSpace":{"status":"UP",
//!   "details":{"total":107374182400,"free":53687091200}}}}
//! ```
//!
//! Disk values are converted to gigabytes, rounded to two decimal places.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{DiskUsage, Observation};

const GIB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Actuator health response
#[derive(Debug, Deserialize)]
struct ActuatorHealth {
    /// Top-level status string, `UP` when healthy
    status: String,
    #[serde(default)]
    components: Option<Components>,
}

#[derive(Debug, Deserialize)]
struct Components {
    #[serde(rename = "diskSpace", default)]
    disk_space: Option<DiskSpace>,
}

#[derive(Debug, Deserialize)]
struct DiskSpace {
    #[serde(default)]
    details: Option<DiskDetails>,
}

/// Disk figures reported in bytes
#[derive(Debug, Deserialize)]
struct DiskDetails {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    free: Option<u64>,
}

impl ActuatorHealth {
    fn disk_usage(&self) -> Option<DiskUsage> {
        let details = self
            .components
            .as_ref()?
            .disk_space
            .as_ref()?
            .details
            .as_ref()?;
        Some(DiskUsage {
            total_gb: bytes_to_gb(details.total?),
            free_gb: bytes_to_gb(details.free?),
        })
    }
}

/// Probe `{base_url}/actuator/health/custom` for `"status": "UP"`.
pub async fn probe_actuator(client: &Client, base_url: &str) -> Observation {
    let url = format!("{}/actuator/health/custom", base_url.trim_end_matches('/'));

    match client.get(&url).send().await {
        Ok(response) if response.status() == StatusCode::OK => {
            match response.json::<ActuatorHealth>().await {
                Ok(health) => {
                    let disk = health.disk_usage();
                    if let Some(disk) = disk {
                        debug!(
                            total_gb = disk.total_gb,
                            free_gb = disk.free_gb,
                            "Disk space reported by health endpoint"
                        );
                    }
                    Observation {
                        up: health.status == "UP",
                        disk,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse health response");
                    Observation::unhealthy()
                }
            }
        }
        Ok(response) => {
            debug!(status = %response.status(), "Health endpoint returned non-200 status");
            Observation::unhealthy()
        }
        Err(e) => {
            warn!(error = %e, "Health check request failed");
            Observation::unhealthy()
        }
    }
}

/// Bytes to gigabytes (divide by 1024³), rounded to two decimal places.
fn bytes_to_gb(bytes: u64) -> f64 {
    (bytes as f64 / GIB * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actuator_health_deserialize_with_disk() {
        let json = r#"{"status":"UP","components":{"diskSpace":{"status":"UP","details":{"total":107374182400,"free":53687091200}}}}"#;
        let health: ActuatorHealth = serde_json::from_str(json).unwrap();

        assert_eq!(health.status, "UP");
        let disk = health.disk_usage().expect("disk usage");
        assert_eq!(disk.total_gb, 100.0);
        assert_eq!(disk.free_gb, 50.0);
    }

    #[test]
    fn test_actuator_health_deserialize_status_only() {
        let json = r#"{"status":"DOWN"}"#;
        let health: ActuatorHealth = serde_json::from_str(json).unwrap();

        assert_eq!(health.status, "DOWN");
        assert!(health.disk_usage().is_none());
    }

    #[test]
    fn test_actuator_health_partial_disk_details() {
        // A lone total without free must not produce a half-filled reading.
        let json = r#"{"status":"UP","components":{"diskSpace":{"details":{"total":107374182400}}}}"#;
        let health: ActuatorHealth = serde_json::from_str(json).unwrap();

        assert!(health.disk_usage().is_none());
    }

    #[test]
    fn test_bytes_to_gb_rounds_to_two_places() {
        assert_eq!(bytes_to_gb(107374182400), 100.0);
        assert_eq!(bytes_to_gb(53687091200), 50.0);
        assert_eq!(bytes_to_gb(1610612736), 1.5);
        // 3 GiB / 7 is not representable exactly; check the rounding
        assert_eq!(bytes_to_gb(460175067), 0.43);
    }
}
