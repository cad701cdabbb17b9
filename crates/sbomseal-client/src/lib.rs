//! # sbomseal-client — Typed clients for the pipeline's remote subsystems
//!
//! One adapter per external collaborator, each a thin typed layer over the
//! shared bounded HTTP primitive in [`http::ServiceClient`]:
//!
//! | Adapter                  | Subsystem            | Operations |
//! |--------------------------|----------------------|------------|
//! | [`MerkleProofClient`]    | merkle-proof-service | `POST /prove-batch`, `GET /health` |
//! | [`ProvingClient`]        | proving-service      | `POST /prove-merkle-compact`, `GET /health` |
//! | [`ArtifactStoreClient`]  | artifact store       | `GET /retrieve/{key}`, `POST /store`, `GET /health` |
//! | [`LedgerAnchorClient`]   | ledger anchoring     | `POST /anchor` |
//!
//! ## Error Handling
//!
//! Failures classify into [`RemoteError`]: `ConnectFailed` (unreachable),
//! `UpstreamStatus` (reached, non-2xx), `Timeout`, and `Decode` (response
//! missing required fields — fail fast, never silently default). Adapters
//! never retry; retry policy belongs to the caller.
//!
//! ## Sharing
//!
//! All adapters ride one `reqwest::Client` built by [`SubsystemClients::new`]
//! and are cheap to clone. Construct once at startup and share via `Arc` —
//! never per request.

pub mod anchor;
pub mod config;
pub mod error;
pub mod http;
pub mod merkle;
pub mod proving;
pub mod store;

pub use anchor::{AnchorOutcome, AnchorRecord, LedgerAnchorClient, SKIPPED_SENTINEL};
pub use config::{ConfigError, SubsystemConfig};
pub use error::{RemoteError, Subsystem};
pub use merkle::{MerkleProofBatch, MerkleProofClient};
pub use proving::{ComplianceProofArtifact, ProvingClient};
pub use store::ArtifactStoreClient;

use std::time::Duration;

use crate::http::ServiceClient;

/// All four subsystem adapters over one shared HTTP client.
#[derive(Debug, Clone)]
pub struct SubsystemClients {
    merkle: MerkleProofClient,
    proving: ProvingClient,
    store: ArtifactStoreClient,
    ledger: LedgerAnchorClient,
}

impl SubsystemClients {
    /// Build every adapter from the subsystem configuration.
    pub fn new(config: SubsystemConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            merkle: MerkleProofClient::new(ServiceClient::new(
                client.clone(),
                config.merkle_url,
                Subsystem::Merkle,
                Duration::from_secs(config.merkle_timeout_secs),
            )),
            proving: ProvingClient::new(ServiceClient::new(
                client.clone(),
                config.proving_url,
                Subsystem::Proving,
                Duration::from_secs(config.proving_timeout_secs),
            )),
            store: ArtifactStoreClient::new(ServiceClient::new(
                client.clone(),
                config.artifact_store_url,
                Subsystem::ArtifactStore,
                Duration::from_secs(config.store_timeout_secs),
            )),
            ledger: LedgerAnchorClient::new(ServiceClient::new(
                client,
                config.ledger_anchor_url,
                Subsystem::Ledger,
                Duration::from_secs(config.anchor_timeout_secs),
            )),
        })
    }

    pub fn merkle(&self) -> &MerkleProofClient {
        &self.merkle
    }

    pub fn proving(&self) -> &ProvingClient {
        &self.proving
    }

    pub fn store(&self) -> &ArtifactStoreClient {
        &self.store
    }

    pub fn ledger(&self) -> &LedgerAnchorClient {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_build_from_default_config() {
        let config = SubsystemConfig::default();
        assert!(SubsystemClients::new(config).is_ok());
    }
}
