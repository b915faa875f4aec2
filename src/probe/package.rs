//! Package-lookup health probe
//!
//! Queries `GET {base_url}/api/info?purl=<purl>`. The endpoint reports
//! vulnerability counts for a package, not liveness, so the mapping is
//! intentionally permissive: any completed HTTP 200 response counts as
//! healthy, whether vulnerabilities were found or not. Only a request
//! failure (transport error or non-200 status) maps to down.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::Observation;

/// Probe the package-lookup endpoint with the configured purl.
pub async fn probe_package(client: &Client, base_url: &str, purl: &str) -> Observation {
    let url = format!("{}/api/info", base_url.trim_end_matches('/'));

    match client.get(&url).query(&[("purl", purl)]).send().await {
        Ok(response) if response.status() == StatusCode::OK => {
            match response.json::<Value>().await {
                Ok(body) => {
                    debug!(
                        purl = %purl,
                        vulnerabilities = ?vulnerability_count(&body),
                        "Package lookup completed"
                    );
                }
                Err(e) => {
                    debug!(purl = %purl, error = %e, "Package lookup body was not JSON");
                }
            }
            Observation::healthy()
        }
        Ok(response) => {
            debug!(status = %response.status(), "Package lookup returned non-200 status");
            Observation::unhealthy()
        }
        Err(e) => {
            warn!(error = %e, "Package lookup request failed");
            Observation::unhealthy()
        }
    }
}

/// Vulnerability count carried by the response, for log output only.
fn vulnerability_count(body: &Value) -> Option<u64> {
    match body.get("vulnerabilities")? {
        Value::Number(n) => n.as_u64(),
        Value::Array(entries) => Some(entries.len() as u64),
        _ => None,
    }
}
