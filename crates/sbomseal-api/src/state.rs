//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the proof pipeline (and through it the
//! shared subsystem clients) behind an `Arc` so cloning per request is a
//! pointer copy.

use std::sync::Arc;

use sbomseal_client::{SubsystemClients, SubsystemConfig};
use sbomseal_pipeline::ProofPipeline;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<ProofPipeline>,
}

impl AppState {
    pub fn new(pipeline: ProofPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Build state from subsystem configuration, constructing the shared
    /// HTTP client once.
    pub fn from_config(config: SubsystemConfig) -> Result<Self, sbomseal_client::ConfigError> {
        let clients = SubsystemClients::new(config)?;
        Ok(Self::new(ProofPipeline::new(clients)))
    }
}
