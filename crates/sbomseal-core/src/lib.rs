//! # sbomseal-core — Canonical identifiers for the compliance proof pipeline
//!
//! Pure functions and validated newtypes that turn a client request
//! (`root_hash` + `banned_list`) into the deterministic identifiers the
//! rest of the pipeline keys on:
//!
//! - [`NormalizedHash`] — the single accepted form for every hash-typed
//!   field (lowercase, no `0x` prefix, exactly 64 hex characters).
//! - [`banned_list_hash`] — order-sensitive digest of the banned list.
//! - [`composite_hash`] — the primary idempotency and storage key.
//! - [`TxHash`] — shape-validated ledger transaction identifier.
//!
//! Everything in this crate is synchronous and side-effect free. The
//! composite hash is a pure function of its inputs: identical inputs yield
//! the identical key across retries, replicas, and time. Deduplication
//! correctness in the pipeline rests on that invariant.

pub mod hash;
pub mod request;

pub use hash::{
    banned_list_hash, composite_hash, HashFormatError, NormalizedHash, TxHash, TxHashFormatError,
};
pub use request::{ComplianceRequest, RequestError};
