//! The pipeline state machine.

use serde::Serialize;
use thiserror::Error;

use sbomseal_client::{
    AnchorOutcome, AnchorRecord, RemoteError, Subsystem, SubsystemClients, SKIPPED_SENTINEL,
};
use sbomseal_core::{
    banned_list_hash, composite_hash, ComplianceRequest, NormalizedHash, RequestError,
};

use crate::dedup::IdempotencyGate;

/// Pipeline stages, in execution order. Used for tracing and error
/// context; the pipeline itself is a straight-line async function whose
/// control flow realizes these transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    DedupCheck,
    FetchingMerkleProofs,
    Proving,
    VerifyingHashes,
    Storing,
    Anchoring,
    Completed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::DedupCheck => "dedup_check",
            Self::FetchingMerkleProofs => "fetching_merkle_proofs",
            Self::Proving => "proving",
            Self::VerifyingHashes => "verifying_hashes",
            Self::Storing => "storing",
            Self::Anchoring => "anchoring",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad input shape — the client's fault, never retried.
    #[error("invalid request: {0}")]
    Validation(#[from] RequestError),

    /// The Merkle subsystem produced nothing to prove. A data problem,
    /// not a transport problem; not retried automatically.
    #[error("no merkle proofs generated")]
    NoProofsGenerated,

    /// The proving subsystem processed different inputs than requested.
    /// Fatal integrity failure: the artifact is untrusted and must not be
    /// stored or anchored.
    #[error("hash mismatch on {field}: computed={computed}, proven={proven}")]
    HashMismatch {
        field: &'static str,
        computed: String,
        proven: String,
    },

    /// The ledger anchoring mechanism failed or reported a malformed
    /// transaction id.
    #[error("anchoring failed: {0}")]
    AnchorFailed(String),

    /// A remote subsystem call failed (unreachable, non-2xx, timeout, or
    /// contract-violating response).
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// The completed pipeline's result record. Assembled once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub composite_hash: NormalizedHash,
    pub root_hash: NormalizedHash,
    /// Artifact locator in the store.
    pub ipfs_cid: String,
    /// Ledger transaction id, or `"SKIPPED"` when nothing new was
    /// anchored (dedup hit, or the anchor layer found the record
    /// on-chain already).
    pub tx_hash: String,
    /// Compliance verdict; `None` on a dedup hit, where no fresh verdict
    /// was computed.
    pub compliant: Option<bool>,
    /// Present on a dedup hit: no new proof was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// The end-to-end proof pipeline over shared subsystem clients.
///
/// Holds no mutable state: one instance serves any number of concurrent
/// requests, each request running its stages strictly in order.
#[derive(Debug, Clone)]
pub struct ProofPipeline {
    clients: SubsystemClients,
}

impl ProofPipeline {
    pub fn new(clients: SubsystemClients) -> Self {
        Self { clients }
    }

    /// Access the underlying subsystem clients (health reporting).
    pub fn clients(&self) -> &SubsystemClients {
        &self.clients
    }

    /// Run the full pipeline for one request.
    ///
    /// Stages execute strictly in order; the first failure aborts the run
    /// with nothing stored or anchored past the point of failure.
    pub async fn generate_and_store_proof(
        &self,
        request: &ComplianceRequest,
    ) -> Result<PipelineResult, PipelineError> {
        // -- Validating --
        let root = request.validate()?;
        tracing::info!(stage = %Stage::Validating, root_hash = %root, "pipeline started");

        let banned_hash = banned_list_hash(&request.banned_list);
        let composite = composite_hash(&root, &banned_hash);
        tracing::info!(
            stage = %Stage::Validating,
            banned_list_hash = %banned_hash,
            composite_hash = %composite,
            entries = request.banned_list.len(),
            "canonical hashes computed"
        );

        // -- DedupCheck --
        tracing::info!(
            stage = %Stage::DedupCheck,
            composite_hash = %composite,
            "consulting idempotency gate"
        );
        let gate = IdempotencyGate::new(self.clients.store());
        if let Some(locator) = gate.check(&composite).await? {
            return Ok(PipelineResult {
                composite_hash: composite,
                root_hash: root,
                ipfs_cid: locator,
                tx_hash: SKIPPED_SENTINEL.to_string(),
                compliant: None,
                warning: Some(
                    "Proof already exists in the artifact store. No new proof was generated."
                        .to_string(),
                ),
            });
        }

        // -- FetchingMerkleProofs --
        tracing::info!(stage = %Stage::FetchingMerkleProofs, "requesting merkle proof batch");
        let batch = self
            .clients
            .merkle()
            .generate_proofs(root.as_str(), &request.banned_list)
            .await?;
        if batch.is_empty() {
            return Err(PipelineError::NoProofsGenerated);
        }

        // -- Proving --
        tracing::info!(
            stage = %Stage::Proving,
            proofs = batch.merkle_proofs.len(),
            "running compliance proof"
        );
        let artifact = self
            .clients
            .proving()
            .prove(&batch.root, batch.depth, &batch.merkle_proofs)
            .await?;

        // -- VerifyingHashes --
        // The prover echoes its own view of the inputs; recompute the
        // composite key from the echo and require it to reproduce ours.
        let proven_root =
            NormalizedHash::parse(&artifact.root_hash).map_err(|e| RemoteError::Decode {
                subsystem: Subsystem::Proving,
                detail: format!("echoed root_hash not normalizable: {e}"),
            })?;
        let proven_banned =
            NormalizedHash::parse(&artifact.banned_list_hash).map_err(|e| RemoteError::Decode {
                subsystem: Subsystem::Proving,
                detail: format!("echoed banned_list_hash not normalizable: {e}"),
            })?;

        if proven_banned != banned_hash {
            return Err(PipelineError::HashMismatch {
                field: "banned_list_hash",
                computed: banned_hash.to_string(),
                proven: proven_banned.to_string(),
            });
        }

        let recomputed = composite_hash(&proven_root, &proven_banned);
        if recomputed != composite {
            return Err(PipelineError::HashMismatch {
                field: "composite_hash",
                computed: composite.to_string(),
                proven: recomputed.to_string(),
            });
        }
        tracing::info!(
            stage = %Stage::VerifyingHashes,
            composite_hash = %composite,
            "cross-verification passed"
        );

        // -- Storing --
        tracing::info!(stage = %Stage::Storing, "persisting proof artifact");
        let locator = self.clients.store().store(&artifact.raw, &composite).await?;

        // -- Anchoring --
        tracing::info!(
            stage = %Stage::Anchoring,
            locator = %locator,
            "anchoring compliance record"
        );
        let record = AnchorRecord {
            root_hash: proven_root.clone(),
            ipfs_cid: locator.clone(),
            banned_list_hash: banned_hash,
            compliant: artifact.compliant,
        };
        let outcome = self
            .clients
            .ledger()
            .anchor(&record)
            .await
            .map_err(classify_anchor_failure)?;

        let tx_hash = match outcome {
            AnchorOutcome::Submitted(tx) => tx.to_string(),
            AnchorOutcome::Skipped => SKIPPED_SENTINEL.to_string(),
        };

        tracing::info!(
            stage = %Stage::Completed,
            composite_hash = %composite,
            tx_hash = %tx_hash,
            "pipeline completed"
        );

        Ok(PipelineResult {
            composite_hash: composite,
            root_hash: proven_root,
            ipfs_cid: locator,
            tx_hash,
            compliant: Some(artifact.compliant),
            warning: None,
        })
    }
}

/// Ledger failures where the mechanism answered but the submission did
/// not go through are `AnchorFailed`; transport failures (unreachable,
/// timed out) keep their remote classification so callers can distinguish
/// a down anchoring layer from a rejected submission.
fn classify_anchor_failure(err: RemoteError) -> PipelineError {
    match err {
        RemoteError::UpstreamStatus { .. } | RemoteError::Decode { .. } => {
            PipelineError::AnchorFailed(err.to_string())
        }
        other => PipelineError::Remote(other),
    }
}
