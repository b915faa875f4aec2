//! Root informational endpoint

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
struct RootResponse {
    #[serde(rename = "Hello")]
    hello: &'static str,
    #[serde(rename = "See metrics")]
    see_metrics: String,
}

/// GET /
pub async fn read_root(State(state): State<AppState>) -> Response {
    Json(RootResponse {
        hello: "World from metrics exporter!",
        see_metrics: state.metrics_url.clone(),
    })
    .into_response()
}
