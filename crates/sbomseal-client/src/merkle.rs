//! Client for the Merkle proof subsystem.
//!
//! `POST /prove-batch` builds one sparse-Merkle-tree proof path per
//! banned-list entry against the given root. The proof paths themselves
//! are opaque to the orchestrator: they are forwarded to the proving
//! subsystem exactly as received.

use serde::Serialize;

use crate::error::RemoteError;
use crate::http::ServiceClient;

/// Tree depth assumed when the subsystem omits it.
const DEFAULT_DEPTH: u32 = 256;

#[derive(Debug, Serialize)]
struct ProveBatchRequest<'a> {
    root: &'a str,
    purls: &'a [String],
    compress: bool,
    accumulator: &'a str,
}

/// A batch of Merkle proofs: one opaque proof path per requested entry.
#[derive(Debug, Clone)]
pub struct MerkleProofBatch {
    /// The root the proofs were built against.
    pub root: String,
    /// Tree depth.
    pub depth: u32,
    /// Opaque proof paths, forwarded unmodified to the proving subsystem.
    pub merkle_proofs: Vec<serde_json::Value>,
}

impl MerkleProofBatch {
    pub fn is_empty(&self) -> bool {
        self.merkle_proofs.is_empty()
    }
}

/// Adapter for the Merkle proof subsystem.
#[derive(Debug, Clone)]
pub struct MerkleProofClient {
    inner: ServiceClient,
}

impl MerkleProofClient {
    pub(crate) fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Request one proof per banned-list entry against `root_hash`.
    ///
    /// Compressed SMT proofs are always requested. A response without a
    /// `merkle_proofs` array yields an empty batch; deciding whether an
    /// empty batch is an error belongs to the pipeline.
    pub async fn generate_proofs(
        &self,
        root_hash: &str,
        banned_list: &[String],
    ) -> Result<MerkleProofBatch, RemoteError> {
        let body = ProveBatchRequest {
            root: root_hash,
            purls: banned_list,
            compress: true,
            accumulator: "smt",
        };

        let resp = self.inner.post_json("prove-batch", &body).await?;

        let merkle_proofs = resp
            .get("merkle_proofs")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let depth = resp
            .get("depth")
            .and_then(|v| v.as_u64())
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(DEFAULT_DEPTH);
        let root = resp
            .get("root")
            .and_then(|v| v.as_str())
            .unwrap_or(root_hash)
            .to_string();

        tracing::info!(
            subsystem = %self.inner.subsystem(),
            proofs = merkle_proofs.len(),
            depth,
            "merkle proof batch received"
        );

        Ok(MerkleProofBatch {
            root,
            depth,
            merkle_proofs,
        })
    }

    /// Liveness probe.
    pub async fn health(&self) -> bool {
        self.inner.health().await
    }
}
