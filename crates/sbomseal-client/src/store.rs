//! Client for the content-addressed artifact store.
//!
//! The store keys artifacts by composite hash and enforces at-most-one
//! record per key itself: storing under an existing key returns the
//! existing locator instead of creating a duplicate. That makes `store`
//! safe to call twice with the same key, which the pipeline's documented
//! dedup/store race depends on.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use sbomseal_core::NormalizedHash;

use crate::error::RemoteError;
use crate::http::ServiceClient;

#[derive(Debug, Serialize)]
struct StoreRequest<'a> {
    /// Base64 of the artifact's JSON bytes.
    proof: String,
    composite_hash: &'a str,
}

/// Adapter for the artifact store.
#[derive(Debug, Clone)]
pub struct ArtifactStoreClient {
    inner: ServiceClient,
}

impl ArtifactStoreClient {
    pub(crate) fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Look up the locator for a composite hash.
    ///
    /// `GET /retrieve/{composite_hash}`; a 404 is a normal miss, not an
    /// error.
    pub async fn exists(
        &self,
        composite_hash: &NormalizedHash,
    ) -> Result<Option<String>, RemoteError> {
        let path = format!("retrieve/{composite_hash}");
        let Some(resp) = self.inner.get_json(&path).await? else {
            return Ok(None);
        };

        let locator = resp
            .get("ipfs_cid")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| RemoteError::Decode {
                subsystem: self.inner.subsystem(),
                detail: "missing required field `ipfs_cid`".to_string(),
            })?;

        Ok(Some(locator))
    }

    /// Persist a proof artifact under its composite hash.
    ///
    /// The artifact document is serialized and base64-encoded for the
    /// store's `POST /store` contract. Both a fresh store (201) and a
    /// key-already-present response (200, existing locator) succeed.
    pub async fn store(
        &self,
        artifact: &serde_json::Value,
        composite_hash: &NormalizedHash,
    ) -> Result<String, RemoteError> {
        let bytes = serde_json::to_vec(artifact).map_err(|e| RemoteError::Decode {
            subsystem: self.inner.subsystem(),
            detail: format!("artifact not serializable: {e}"),
        })?;

        let body = StoreRequest {
            proof: BASE64.encode(&bytes),
            composite_hash: composite_hash.as_str(),
        };

        tracing::info!(
            subsystem = %self.inner.subsystem(),
            artifact_bytes = bytes.len(),
            "storing proof artifact"
        );

        let resp = self.inner.post_json("store", &body).await?;

        resp.get("ipfs_cid")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| RemoteError::Decode {
                subsystem: self.inner.subsystem(),
                detail: "store response missing `ipfs_cid`".to_string(),
            })
    }

    /// Liveness probe.
    pub async fn health(&self) -> bool {
        self.inner.health().await
    }
}
