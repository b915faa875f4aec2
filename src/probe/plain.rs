//! Plaintext health probe
//!
//! Trivy-style servers expose `GET /healthz` answering `ok` in plain text
//! with HTTP 200 when alive. Anything else, including transport errors and
//! timeouts, counts as down.

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::Observation;

/// Probe `{base_url}/healthz` for a plaintext `ok`.
pub async fn probe_plain(client: &Client, base_url: &str) -> Observation {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));

    match client.get(&url).send().await {
        Ok(response) if response.status() == StatusCode::OK => match response.text().await {
            Ok(body) if body_is_ok(&body) => Observation::healthy(),
            Ok(body) => {
                debug!(body = %body.trim(), "Unexpected health response body");
                Observation::unhealthy()
            }
            Err(e) => {
                debug!(error = %e, "Failed to read health response body");
                Observation::unhealthy()
            }
        },
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

/// `ok`, case-insensitively, ignoring surrounding whitespace.
fn body_is_ok(body: &str) -> bool {
    body.trim().eq_ignore_ascii_case("ok")
}
