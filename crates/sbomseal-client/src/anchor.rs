//! Client for the ledger anchoring mechanism.
//!
//! Anchoring submits `{root_hash, ipfs_cid, banned_list_hash, compliant}`
//! to the ledger and yields a transaction identifier. The mechanism's
//! contract is line-oriented: its response text carries the result on the
//! **last non-empty line** — either the sentinel `SKIPPED` (the record
//! already exists on-chain) or a `0x`-prefixed 66-character transaction
//! hash. Anything else is rejected before being trusted.

use serde::Serialize;

use sbomseal_core::{NormalizedHash, TxHash};

use crate::error::RemoteError;
use crate::http::ServiceClient;

/// Sentinel the anchoring layer emits when the record is already on-chain.
pub const SKIPPED_SENTINEL: &str = "SKIPPED";

/// The record anchored to the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct AnchorRecord {
    pub root_hash: NormalizedHash,
    /// Artifact locator returned by the store.
    pub ipfs_cid: String,
    pub banned_list_hash: NormalizedHash,
    pub compliant: bool,
}

/// Result of an anchoring call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// A transaction was submitted; identifier shape already validated.
    Submitted(TxHash),
    /// The anchoring layer found the record already on-chain.
    Skipped,
}

/// Adapter for the ledger anchoring endpoint.
#[derive(Debug, Clone)]
pub struct LedgerAnchorClient {
    inner: ServiceClient,
}

impl LedgerAnchorClient {
    pub(crate) fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Anchor a compliance record, validating the reported transaction id.
    pub async fn anchor(&self, record: &AnchorRecord) -> Result<AnchorOutcome, RemoteError> {
        let output = self.inner.post_text("anchor", record).await?;

        let last_line = output
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();

        if last_line == SKIPPED_SENTINEL {
            tracing::info!(
                subsystem = %self.inner.subsystem(),
                root_hash = %record.root_hash,
                "record already anchored, skipping"
            );
            return Ok(AnchorOutcome::Skipped);
        }

        let tx_hash = TxHash::parse(last_line).map_err(|_| RemoteError::Decode {
            subsystem: self.inner.subsystem(),
            detail: format!("malformed transaction id: {last_line:?}"),
        })?;

        tracing::info!(
            subsystem = %self.inner.subsystem(),
            tx_hash = %tx_hash,
            "anchor transaction submitted"
        );

        Ok(AnchorOutcome::Submitted(tx_hash))
    }
}
