//! Idempotency gate over the artifact store.
//!
//! The artifact store is the source of truth for "has this exact request
//! been fully processed before". The gate is best-effort and
//! non-transactional: two concurrent requests with the same composite
//! hash can both miss here and both run the full pipeline — the store's
//! per-key uniqueness constraint then keeps storage at-most-once. The
//! gate exists to avoid the expensive proof computation in the common
//! sequential case, not to serialize concurrent duplicates.

use sbomseal_client::{ArtifactStoreClient, RemoteError};
use sbomseal_core::NormalizedHash;

/// Checks whether a composite hash has already been fully processed.
#[derive(Debug, Clone)]
pub struct IdempotencyGate<'a> {
    store: &'a ArtifactStoreClient,
}

impl<'a> IdempotencyGate<'a> {
    pub fn new(store: &'a ArtifactStoreClient) -> Self {
        Self { store }
    }

    /// Return the existing artifact locator for `composite_hash`, if any.
    pub async fn check(
        &self,
        composite_hash: &NormalizedHash,
    ) -> Result<Option<String>, RemoteError> {
        let existing = self.store.exists(composite_hash).await?;
        if let Some(locator) = &existing {
            tracing::warn!(
                composite_hash = %composite_hash,
                locator = %locator,
                "proof already exists, short-circuiting pipeline"
            );
        }
        Ok(existing)
    }
}
