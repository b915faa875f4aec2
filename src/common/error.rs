//! Error type definitions
//!
//! Unified error type (using thiserror). Upstream health failures are NOT
//! errors in this sense: they are mapped to a gauge value of 0 by the
//! probes and never surface as an `Err` anywhere.

use thiserror::Error;

/// Exporter error type
#[derive(Debug, Error)]
pub enum ExporterError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Metrics registration or encoding error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Metrics exposition produced non-UTF-8 output
    #[error("Metrics encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias
pub type ExporterResult<T> = Result<T, ExporterError>;
