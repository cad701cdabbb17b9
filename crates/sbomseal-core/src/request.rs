//! The accepted compliance request and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{HashFormatError, NormalizedHash};

/// Reasons a compliance request is rejected before the pipeline runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    InvalidRootHash(#[from] HashFormatError),
    #[error("banned_list must not be empty")]
    EmptyBannedList,
}

/// A compliance proof request as received at the API boundary.
///
/// Immutable once accepted: validation happens exactly once, up front, and
/// the validated form ([`NormalizedHash`] + non-empty list) is what the
/// pipeline operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    /// Identifier of the dataset/SBOM snapshot being checked.
    pub root_hash: String,
    /// Ordered list of disallowed entries. Order is part of the
    /// compliance declaration.
    pub banned_list: Vec<String>,
}

impl ComplianceRequest {
    /// Validate the request, yielding the normalized root hash.
    ///
    /// Rejects a root hash that does not normalize to 64 hex characters
    /// and an empty banned list. The banned list itself is passed through
    /// untouched — order and content are the caller's declaration.
    pub fn validate(&self) -> Result<NormalizedHash, RequestError> {
        if self.banned_list.is_empty() {
            return Err(RequestError::EmptyBannedList);
        }
        Ok(NormalizedHash::parse(&self.root_hash)?)
    }
}
