//! # Health API
//!
//! `GET /health` — readiness aggregate over the remote subsystems. Probes
//! the Merkle, proving, and artifact store health endpoints concurrently
//! with a short per-probe timeout and reports per-subsystem status. The
//! ledger anchoring layer exposes no health endpoint and is not probed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Aggregate health report.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` when every probed subsystem answered, else `"degraded"`.
    pub status: String,
    pub services: ServiceStatuses,
}

/// Per-subsystem probe results.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatuses {
    pub merkle_proof_service: String,
    pub proving_service: String,
    pub artifact_store: String,
}

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

fn label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

/// GET /health — Probe all subsystems and report readiness.
///
/// Returns 200 when every subsystem is reachable, 503 otherwise. The body
/// carries per-subsystem detail either way.
async fn health(State(state): State<AppState>) -> Response {
    let clients = state.pipeline.clients();
    let (merkle, proving, store) = tokio::join!(
        clients.merkle().health(),
        clients.proving().health(),
        clients.store().health(),
    );

    let all_healthy = merkle && proving && store;
    let body = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services: ServiceStatuses {
            merkle_proof_service: label(merkle),
            proving_service: label(proving),
            artifact_store: label(store),
        },
    };

    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}
