//! Hash normalization and canonical digest computation.
//!
//! The proving subsystem independently serializes the banned list and
//! hashes it; [`banned_list_hash`] must byte-for-byte match that
//! convention (compact JSON array, no inter-token whitespace, original
//! order) because the orchestrator cross-checks the echoed digest against
//! its own. List order is part of the compliance declaration: permuting
//! the list produces a different digest, and callers are expected to
//! canonicalize order themselves.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// A hash string that failed normalization.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hash format (expected 64 hex characters): {input}")]
pub struct HashFormatError {
    /// The offending input, as received.
    pub input: String,
}

/// A transaction identifier that failed shape validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid transaction hash (expected 0x-prefixed 64 hex characters): {input}")]
pub struct TxHashFormatError {
    pub input: String,
}

/// A normalized hash: lowercase, no `0x` prefix, exactly 64 hex characters.
///
/// The only constructor is [`NormalizedHash::parse`]; any value of this
/// type is guaranteed to be in canonical form, so equality comparison is
/// byte equality and no further case-folding is needed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedHash(String);

impl NormalizedHash {
    /// Parse and normalize a hash string.
    ///
    /// Lowercases, trims surrounding whitespace, strips an optional `0x`
    /// prefix, and rejects anything that is not then exactly 64 hex
    /// characters.
    pub fn parse(input: &str) -> Result<Self, HashFormatError> {
        let lowered = input.trim().to_ascii_lowercase();
        let stripped = lowered.strip_prefix("0x").unwrap_or(&lowered);

        if stripped.len() != 64 || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HashFormatError {
                input: input.to_string(),
            });
        }

        Ok(Self(stripped.to_string()))
    }

    /// The canonical 64-character lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger transaction identifier: `0x` followed by 64 hex characters.
///
/// The anchoring mechanism reports its result as free-form text; this type
/// is the gate between that text and anything the pipeline trusts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Validate the shape of a transaction identifier.
    ///
    /// Exactly 66 characters: the literal `0x` prefix and 64 hex digits.
    /// No trimming beyond surrounding whitespace; no case normalization —
    /// the identifier is returned as the ledger reported it.
    pub fn parse(input: &str) -> Result<Self, TxHashFormatError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix("0x").ok_or_else(|| TxHashFormatError {
            input: input.to_string(),
        })?;

        if digits.len() != 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TxHashFormatError {
                input: input.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the banned-list digest: SHA-256 of the compact JSON array
/// serialization of `list`, in the given order, hex-encoded.
///
/// `serde_json::to_string` emits no inter-token whitespace, which is the
/// serialization convention the proving subsystem uses for the same list.
pub fn banned_list_hash(list: &[String]) -> NormalizedHash {
    // Serializing a Vec<String> cannot fail.
    let json = serde_json::to_string(list).unwrap_or_default();
    let digest = Sha256::digest(json.as_bytes());
    NormalizedHash(hex::encode(digest))
}

/// Compute the composite key: SHA-256 over the UTF-8 concatenation of the
/// two canonical 64-character hex strings, hex-encoded.
///
/// This is the primary idempotency and artifact-store key. Both inputs are
/// already normalized by construction, so the function is total and pure.
pub fn composite_hash(
    root_hash: &NormalizedHash,
    banned_list_hash: &NormalizedHash,
) -> NormalizedHash {
    let mut hasher = Sha256::new();
    hasher.update(root_hash.as_str().as_bytes());
    hasher.update(banned_list_hash.as_str().as_bytes());
    NormalizedHash(hex::encode(hasher.finalize()))
}
