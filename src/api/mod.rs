//! REST API handlers
//!
//! Two routes: `/` answers a static informational payload and `/metrics`
//! serves the Prometheus exposition, re-running the upstream probe on
//! every scrape.

pub mod metrics;
pub mod root;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::read_root))
        .route("/metrics", get(metrics::serve_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
