//! Metrics endpoint

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::AppState;

/// GET /metrics
///
/// Triggers one upstream probe, then serves the refreshed exposition body.
/// Upstream failures are reflected in the gauge value, never in the HTTP
/// status: this endpoint answers 200 even when the target is completely
/// unreachable.
pub async fn serve_metrics(State(state): State<AppState>) -> Response {
    match state.exporter.scrape().await {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.exporter.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
