//! Upstream target resolution
//!
//! The base URL of the monitored service is resolved once at startup from,
//! in priority order: a named environment variable, a `<service>.url` entry
//! in a YAML configuration file, and a hardcoded default. A missing config
//! file is not an error; it is logged and the resolution falls through to
//! the next source.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

/// Fallback base URL when neither the environment nor the config file
/// provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4954";

/// Which source the resolved base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    /// Named environment variable
    Environment,
    /// `<service>.url` entry in the config file
    ConfigFile,
    /// Hardcoded default
    Default,
}

impl TargetSource {
    /// Stable string form for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::ConfigFile => "config file",
            Self::Default => "default",
        }
    }
}

/// Resolved upstream target. Immutable after startup.
#[derive(Debug, Clone)]
pub struct ServiceTarget {
    /// Root address of the monitored service
    pub base_url: String,
    /// Which source won the resolution
    pub source: TargetSource,
}

/// Per-service entry in the configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceEntry {
    /// Base URL of the service
    #[serde(default)]
    pub url: Option<String>,
}

/// Parsed configuration file: service entries keyed by name.
///
/// ```yaml
/// trivy:
///   url: http://trivy.internal:4954
/// track:
///   url: https://track.internal:8443
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ConfigFile {
    /// Service entries keyed by service name (`trivy`, `track`)
    pub services: HashMap<String, ServiceEntry>,
}

/// Load the configuration file, degrading to an empty configuration when
/// the file is missing or malformed. Never fatal.
pub fn load_config(path: &Path) -> ConfigFile {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            info!(
                path = %path.display(),
                "Configuration file not found; using default values"
            );
            return ConfigFile::default();
        }
    };

    if raw.trim().is_empty() {
        return ConfigFile::default();
    }

    match serde_yaml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to parse configuration file; using default values"
            );
            ConfigFile::default()
        }
    }
}

/// Resolve the upstream base URL for one service.
///
/// First match wins: environment variable (set and non-empty), then the
/// `<service_key>.url` entry of the config file at `config_path`, then
/// [`DEFAULT_BASE_URL`].
pub fn resolve_target(env_var: &str, config_path: &Path, service_key: &str) -> ServiceTarget {
    if let Some(base_url) = env_non_empty(env_var) {
        return ServiceTarget {
            base_url,
            source: TargetSource::Environment,
        };
    }

    let config = load_config(config_path);
    if let Some(base_url) = config
        .services
        .get(service_key)
        .and_then(|entry| entry.url.clone())
    {
        return ServiceTarget {
            base_url,
            source: TargetSource::ConfigFile,
        };
    }

    ServiceTarget {
        base_url: DEFAULT_BASE_URL.to_string(),
        source: TargetSource::Default,
    }
}

/// Read an environment variable, treating empty and whitespace-only values
/// as unset.
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
