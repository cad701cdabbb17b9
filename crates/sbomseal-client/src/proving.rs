//! Client for the ZK proving subsystem.
//!
//! `POST /prove-merkle-compact` runs the compute-heavy proof over a batch
//! of Merkle proofs and returns the compliance verdict together with the
//! subsystem's own view of the inputs it processed. The echoed
//! `root_hash` and `banned_list_hash` are what the orchestrator
//! cross-verifies; the rest of the body (proof blob, metrics) is retained
//! verbatim because the raw document is what gets persisted.

use serde::Serialize;

use crate::error::{RemoteError, Subsystem};
use crate::http::ServiceClient;

#[derive(Debug, Serialize)]
struct ProveMerkleCompactRequest<'a> {
    root: &'a str,
    depth: u32,
    merkle_proofs: &'a [serde_json::Value],
}

/// The proving subsystem's output: verdict, echoed inputs, raw artifact.
#[derive(Debug, Clone)]
pub struct ComplianceProofArtifact {
    /// Root hash the prover claims to have processed.
    pub root_hash: String,
    /// Banned-list digest the prover claims to have processed.
    pub banned_list_hash: String,
    /// Compliance verdict.
    pub compliant: bool,
    /// Proof generation time, when reported.
    pub generation_duration_ms: Option<u64>,
    /// The complete response document — opaque proof payload and metrics
    /// included. This is the artifact the store persists, byte-preserving.
    pub raw: serde_json::Value,
}

impl ComplianceProofArtifact {
    /// Decode the proving response, failing fast on missing fields.
    fn decode(raw: serde_json::Value) -> Result<Self, RemoteError> {
        let field_str = |name: &str| -> Result<String, RemoteError> {
            raw.get(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| RemoteError::Decode {
                    subsystem: Subsystem::Proving,
                    detail: format!("missing required field `{name}`"),
                })
        };

        let root_hash = field_str("root_hash")?;
        let banned_list_hash = field_str("banned_list_hash")?;
        let compliant = raw
            .get("compliant")
            .and_then(|v| v.as_bool())
            .ok_or_else(|| RemoteError::Decode {
                subsystem: Subsystem::Proving,
                detail: "missing required field `compliant`".to_string(),
            })?;
        let generation_duration_ms = raw.get("generation_duration_ms").and_then(|v| v.as_u64());

        Ok(Self {
            root_hash,
            banned_list_hash,
            compliant,
            generation_duration_ms,
            raw,
        })
    }
}

/// Adapter for the ZK proving subsystem.
#[derive(Debug, Clone)]
pub struct ProvingClient {
    inner: ServiceClient,
}

impl ProvingClient {
    pub(crate) fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Run the compliance proof over a fetched Merkle proof batch.
    pub async fn prove(
        &self,
        root: &str,
        depth: u32,
        merkle_proofs: &[serde_json::Value],
    ) -> Result<ComplianceProofArtifact, RemoteError> {
        let body = ProveMerkleCompactRequest {
            root,
            depth,
            merkle_proofs,
        };

        let raw = self.inner.post_json("prove-merkle-compact", &body).await?;
        let artifact = ComplianceProofArtifact::decode(raw)?;

        tracing::info!(
            subsystem = %self.inner.subsystem(),
            compliant = artifact.compliant,
            generation_duration_ms = ?artifact.generation_duration_ms,
            "proof artifact received"
        );

        Ok(artifact)
    }

    /// Liveness probe.
    pub async fn health(&self) -> bool {
        self.inner.health().await
    }
}
