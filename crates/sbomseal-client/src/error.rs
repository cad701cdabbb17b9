//! Remote call error classification.

use thiserror::Error;

/// The four remote collaborators the pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Merkle,
    Proving,
    ArtifactStore,
    Ledger,
}

impl Subsystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merkle => "merkle-proof-service",
            Self::Proving => "proving-service",
            Self::ArtifactStore => "artifact-store",
            Self::Ledger => "ledger-anchor",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed remote call, classified.
///
/// `ConnectFailed` and `Timeout` mean the subsystem never produced an
/// answer (retryable by the caller); `UpstreamStatus` means it answered
/// and rejected the call; `Decode` means it answered 2xx but the body is
/// missing required fields — treated as an upstream contract violation,
/// never papered over with defaults.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{subsystem} unreachable: {detail}")]
    ConnectFailed {
        subsystem: Subsystem,
        detail: String,
    },

    #[error("{subsystem} returned {status}: {body}")]
    UpstreamStatus {
        subsystem: Subsystem,
        status: u16,
        body: String,
    },

    #[error("{subsystem} timed out after {timeout_secs}s")]
    Timeout {
        subsystem: Subsystem,
        timeout_secs: u64,
    },

    #[error("{subsystem} response invalid: {detail}")]
    Decode {
        subsystem: Subsystem,
        detail: String,
    },
}

impl RemoteError {
    /// Which subsystem produced this error.
    pub fn subsystem(&self) -> Subsystem {
        match self {
            Self::ConnectFailed { subsystem, .. }
            | Self::UpstreamStatus { subsystem, .. }
            | Self::Timeout { subsystem, .. }
            | Self::Decode { subsystem, .. } => *subsystem,
        }
    }
}
