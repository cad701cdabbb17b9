//! # sbomseal-pipeline — The compliance proof orchestration pipeline
//!
//! Turns one validated request into a strictly ordered sequence of calls
//! against the four remote subsystems:
//!
//! ```text
//! Validating → DedupCheck → FetchingMerkleProofs → Proving
//!            → VerifyingHashes → Storing → Anchoring → Completed
//! ```
//!
//! with `Failed(reason)` terminal from any stage. Guarantees:
//!
//! - **Deterministic identity**: the composite hash keying the request is
//!   a pure function of `(root_hash, banned_list)` — see `sbomseal-core`.
//! - **At-most-once storage per distinct request**: the dedup gate
//!   short-circuits before any expensive work; the artifact store's own
//!   per-key uniqueness constraint covers the residual (documented,
//!   non-transactional) race between gate check and store.
//! - **Cross-verification**: nothing is stored or anchored until the
//!   proving subsystem's echoed hashes reproduce the composite hash
//!   computed from the original request. A mismatch is fatal.
//!
//! No stage is retried internally and no partial state is left behind: a
//! failure before `Storing` stores nothing, a failure before `Anchoring`
//! anchors nothing.

pub mod dedup;
pub mod orchestrator;

pub use dedup::IdempotencyGate;
pub use orchestrator::{PipelineError, PipelineResult, ProofPipeline, Stage};
