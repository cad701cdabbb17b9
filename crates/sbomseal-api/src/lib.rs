//! # sbomseal-api — Axum HTTP surface for the compliance proof pipeline
//!
//! ## API Surface
//!
//! | Route               | Module             | Purpose |
//! |---------------------|--------------------|---------|
//! | `POST /generate-proof` | [`routes::proof`]  | Run the full pipeline for one request |
//! | `GET /health`          | [`routes::health`] | Readiness aggregate over the subsystems |
//! | `GET /health/liveness` | (inline)           | Process liveness probe |
//!
//! All handlers share one [`state::AppState`], which owns the pipeline and
//! through it the single shared HTTP client for every subsystem call.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
///
/// Health probes stay on the same router; there is no auth layer on this
/// service, it runs inside the cluster behind the gateway.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::proof::router())
        .merge(routes::health::router())
        .route("/health/liveness", axum::routing::get(liveness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}
