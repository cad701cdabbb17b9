//! # Proof Generation API
//!
//! `POST /generate-proof` — run the full compliance proof pipeline for one
//! `(root_hash, banned_list)` request and return the artifact locator and
//! ledger transaction id.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sbomseal_core::{ComplianceRequest, NormalizedHash};
use sbomseal_pipeline::PipelineResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateProofResponse {
    /// Always `"success"` for a 200 response.
    pub status: String,
    /// Normalized Merkle root the proof covers.
    pub root_hash: NormalizedHash,
    /// Idempotency key for this exact request.
    pub composite_hash: NormalizedHash,
    /// Artifact locator in the content-addressed store.
    pub ipfs_cid: String,
    /// Ledger transaction id, or `"SKIPPED"` when nothing new was anchored.
    pub tx_hash: String,
    /// `"compliant"`, `"non_compliant"`, or `"unknown"` on a dedup hit.
    pub compliance_status: String,
    /// Present on a dedup hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<PipelineResult> for GenerateProofResponse {
    fn from(result: PipelineResult) -> Self {
        let compliance_status = match result.compliant {
            Some(true) => "compliant",
            Some(false) => "non_compliant",
            None => "unknown",
        };
        Self {
            status: "success".to_string(),
            root_hash: result.root_hash,
            composite_hash: result.composite_hash,
            ipfs_cid: result.ipfs_cid,
            tx_hash: result.tx_hash,
            compliance_status: compliance_status.to_string(),
            warning: result.warning,
        }
    }
}

/// Build the proof generation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate-proof", post(generate_proof))
}

/// POST /generate-proof — Generate, store, and anchor a compliance proof.
async fn generate_proof(
    State(state): State<AppState>,
    Json(request): Json<ComplianceRequest>,
) -> Result<Json<GenerateProofResponse>, ApiError> {
    let result = state.pipeline.generate_and_store_proof(&request).await?;
    Ok(Json(result.into()))
}
