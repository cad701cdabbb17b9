//! Subsystem endpoint configuration.
//!
//! Base URLs and per-subsystem timeouts, loadable from the environment.
//! Merkle and proving calls carry long timeouts — proof generation is
//! compute-heavy and legitimately runs for tens of minutes — while store
//! and anchor calls are short.

use url::Url;

/// Errors building the subsystem configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Endpoints and timeouts for the four remote subsystems.
#[derive(Debug, Clone)]
pub struct SubsystemConfig {
    /// Base URL of the Merkle proof subsystem.
    pub merkle_url: Url,
    /// Base URL of the ZK proving subsystem.
    pub proving_url: Url,
    /// Base URL of the content-addressed artifact store.
    pub artifact_store_url: Url,
    /// Base URL of the ledger anchoring endpoint.
    pub ledger_anchor_url: Url,
    /// Merkle proof generation timeout (default 1800 s).
    pub merkle_timeout_secs: u64,
    /// ZK proof generation timeout (default 1800 s).
    pub proving_timeout_secs: u64,
    /// Artifact store timeout (default 300 s).
    pub store_timeout_secs: u64,
    /// Ledger anchoring timeout (default 300 s).
    pub anchor_timeout_secs: u64,
}

impl Default for SubsystemConfig {
    fn default() -> Self {
        // In-cluster service DNS names, matching the reference deployment.
        Self {
            merkle_url: fixed_url("http://merkle-proof-service.sbomseal.svc.cluster.local:8090"),
            proving_url: fixed_url("http://proving-service.sbomseal.svc.cluster.local:8080"),
            artifact_store_url: fixed_url("http://ipfs-service.sbomseal.svc.cluster.local:8080"),
            ledger_anchor_url: fixed_url("http://ledger-anchor.sbomseal.svc.cluster.local:8081"),
            merkle_timeout_secs: 1800,
            proving_timeout_secs: 1800,
            store_timeout_secs: 300,
            anchor_timeout_secs: 300,
        }
    }
}

impl SubsystemConfig {
    /// Load configuration from environment variables, falling back to the
    /// in-cluster defaults.
    ///
    /// Variables: `MERKLE_PROOF_SERVICE_URL`, `PROVING_SERVICE_URL`,
    /// `IPFS_SERVICE_URL`, `LEDGER_ANCHOR_URL`, and the matching
    /// `MERKLE_PROOF_TIMEOUT_SECS`, `PROVING_TIMEOUT_SECS`,
    /// `IPFS_TIMEOUT_SECS`, `LEDGER_ANCHOR_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            merkle_url: env_url("MERKLE_PROOF_SERVICE_URL", defaults.merkle_url)?,
            proving_url: env_url("PROVING_SERVICE_URL", defaults.proving_url)?,
            artifact_store_url: env_url("IPFS_SERVICE_URL", defaults.artifact_store_url)?,
            ledger_anchor_url: env_url("LEDGER_ANCHOR_URL", defaults.ledger_anchor_url)?,
            merkle_timeout_secs: env_secs("MERKLE_PROOF_TIMEOUT_SECS", 1800),
            proving_timeout_secs: env_secs("PROVING_TIMEOUT_SECS", 1800),
            store_timeout_secs: env_secs("IPFS_TIMEOUT_SECS", 300),
            anchor_timeout_secs: env_secs("LEDGER_ANCHOR_TIMEOUT_SECS", 300),
        })
    }
}

fn env_url(var: &str, default: Url) -> Result<Url, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => {
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
        }
        Err(_) => Ok(default),
    }
}

fn env_secs(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a URL literal known valid at compile time.
fn fixed_url(raw: &str) -> Url {
    match Url::parse(raw) {
        Ok(url) => url,
        // Unreachable for the literals above.
        Err(_) => Url::parse("http://127.0.0.1:1").unwrap_or_else(|_| unreachable!()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = SubsystemConfig::default();
        assert_eq!(config.merkle_timeout_secs, 1800);
        assert_eq!(config.proving_timeout_secs, 1800);
        assert_eq!(config.store_timeout_secs, 300);
        assert_eq!(config.anchor_timeout_secs, 300);
        assert!(config.merkle_url.as_str().starts_with("http://"));
    }
}
