//! CLI module for healthgauge
//!
//! Provides the command-line interface of the exporter.

use std::path::PathBuf;

use clap::Parser;

use crate::probe::{ExporterKind, DEFAULT_PROBE_PURL, DEFAULT_PROBE_TIMEOUT_SECS};

/// healthgauge - Prometheus health-status exporter for Trivy and Dependency-Track
#[derive(Parser, Debug)]
#[command(name = "healthgauge")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    EXPORTER_HOST                 Bind address (default: 0.0.0.0)
    EXPORTER_PORT                 Listen port (default: 8000)
    EXPORTER_CONFIG               Config file path (default: config.yaml)
    EXPORTER_LOG_LEVEL            Log level (default: info)
    EXPORTER_PROBE_TIMEOUT_SECS   Upstream probe timeout in seconds (default: 2)
    EXPORTER_PROBE_PURL           Package URL probed by track-package
    TRIVY_SERVER_URL              Trivy base URL (overrides the config file)
    TRACK_SERVER_URL              Dependency-Track base URL (overrides the config file)
"#)]
pub struct Cli {
    /// Exporter variant to run
    #[arg(long, value_enum, default_value_t = ExporterKind::Trivy)]
    pub exporter: ExporterKind,

    /// Listen port
    #[arg(short, long, default_value_t = 8000, env = "EXPORTER_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "EXPORTER_HOST")]
    pub host: String,

    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml", env = "EXPORTER_CONFIG")]
    pub config: PathBuf,

    /// Upstream probe timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_PROBE_TIMEOUT_SECS,
        env = "EXPORTER_PROBE_TIMEOUT_SECS"
    )]
    pub probe_timeout_secs: u64,

    /// Package URL queried by the track-package variant
    #[arg(long, default_value = DEFAULT_PROBE_PURL, env = "EXPORTER_PROBE_PURL")]
    pub purl: String,
}
