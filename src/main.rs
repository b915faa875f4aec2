//! Metrics exporter entry point

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use healthgauge::cli::Cli;
use healthgauge::exporter::HealthExporter;
use healthgauge::probe::ProbeSettings;
use healthgauge::{config, logging, server, AppState};
use tracing::info;

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn local_host(&self) -> String {
        match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1".to_string(),
            other => other.to_string(),
        }
    }

    fn metrics_url(&self) -> String {
        format!("http://{}:{}/metrics", self.local_host(), self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init()?;

    info!("healthgauge v{}", env!("CARGO_PKG_VERSION"));

    let target = config::resolve_target(
        cli.exporter.env_var(),
        &cli.config,
        cli.exporter.service(),
    );
    info!(
        service = cli.exporter.service(),
        url = %target.base_url,
        source = target.source.as_str(),
        "Using upstream base URL"
    );

    let settings = ProbeSettings {
        timeout: Duration::from_secs(cli.probe_timeout_secs),
        purl: cli.purl.clone(),
    };
    let exporter = HealthExporter::new(cli.exporter, &target, &settings)?;

    let server_config = ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
    };
    let state = AppState {
        exporter: Arc::new(exporter),
        metrics_url: server_config.metrics_url(),
    };

    server::run(state, &server_config.bind_addr()).await
}
