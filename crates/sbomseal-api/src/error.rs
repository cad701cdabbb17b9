//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps pipeline errors to HTTP status codes and JSON error bodies with a
//! machine-readable code and a human-readable message. Integrity failures
//! never expose the conflicting digests to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sbomseal_client::RemoteError;
use sbomseal_pipeline::PipelineError;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "TIMEOUT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// No Merkle proofs could be generated for this input (422).
    #[error("no merkle proofs generated for the given root and banned list")]
    NoProofsGenerated,

    /// The proving subsystem echoed hashes that do not match the request
    /// (500). The digests are logged, never returned.
    #[error("hash cross-verification failed: {0}")]
    HashMismatch(String),

    /// Ledger anchoring answered but the submission failed (502).
    #[error("ledger anchoring failed: {0}")]
    AnchorFailed(String),

    /// A subsystem could not be reached (502).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A subsystem answered with an error or a contract-violating body (502).
    #[error("upstream error: {0}")]
    UpstreamError(String),

    /// A subsystem call exceeded its deadline (504).
    #[error("upstream timeout: {0}")]
    Timeout(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::NoProofsGenerated => (StatusCode::UNPROCESSABLE_ENTITY, "NO_PROOFS_GENERATED"),
            Self::HashMismatch(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HASH_MISMATCH"),
            Self::AnchorFailed(_) => (StatusCode::BAD_GATEWAY, "ANCHOR_FAILED"),
            Self::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal digests or error internals to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::HashMismatch(_) => {
                "Proof verification failed: the generated proof does not match the request"
                    .to_string()
            }
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) | Self::HashMismatch(_) => {
                tracing::error!(error = %self, "internal server error")
            }
            Self::UpstreamUnavailable(_) | Self::UpstreamError(_) | Self::AnchorFailed(_) => {
                tracing::error!(error = %self, "upstream subsystem error")
            }
            Self::Timeout(_) => tracing::warn!(error = %self, "upstream timeout"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(e) => Self::Validation(e.to_string()),
            PipelineError::NoProofsGenerated => Self::NoProofsGenerated,
            PipelineError::HashMismatch { .. } => Self::HashMismatch(err.to_string()),
            PipelineError::AnchorFailed(msg) => Self::AnchorFailed(msg),
            PipelineError::Remote(remote) => match remote {
                RemoteError::ConnectFailed { .. } => Self::UpstreamUnavailable(remote.to_string()),
                RemoteError::Timeout { .. } => Self::Timeout(remote.to_string()),
                RemoteError::UpstreamStatus { .. } | RemoteError::Decode { .. } => {
                    Self::UpstreamError(remote.to_string())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbomseal_client::Subsystem;

    #[test]
    fn validation_status_code() {
        let (status, code) = ApiError::Validation("bad root".into()).status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn no_proofs_status_code() {
        let (status, code) = ApiError::NoProofsGenerated.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "NO_PROOFS_GENERATED");
    }

    #[test]
    fn hash_mismatch_status_code() {
        let (status, code) = ApiError::HashMismatch("x".into()).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "HASH_MISMATCH");
    }

    #[test]
    fn timeout_status_code() {
        let (status, code) = ApiError::Timeout("merkle".into()).status_and_code();
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(code, "TIMEOUT");
    }

    #[test]
    fn connect_failed_maps_to_unavailable() {
        let err = ApiError::from(PipelineError::Remote(RemoteError::ConnectFailed {
            subsystem: Subsystem::Merkle,
            detail: "refused".into(),
        }));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "UPSTREAM_UNAVAILABLE");
    }

    #[test]
    fn upstream_status_maps_to_upstream_error() {
        let err = ApiError::from(PipelineError::Remote(RemoteError::UpstreamStatus {
            subsystem: Subsystem::Proving,
            status: 500,
            body: "crash".into(),
        }));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "UPSTREAM_ERROR");
    }

    use http_body_util::BodyExt;

    async fn response_parts(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_validation_keeps_message() {
        let (status, body) =
            response_parts(ApiError::Validation("root_hash too short".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert!(body.error.message.contains("root_hash too short"));
    }

    #[tokio::test]
    async fn into_response_hash_mismatch_hides_digests() {
        let digests = "computed=aaaa, proven=bbbb";
        let (status, body) = response_parts(ApiError::HashMismatch(digests.into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "HASH_MISMATCH");
        assert!(
            !body.error.message.contains("aaaa"),
            "digest must not leak: {}",
            body.error.message
        );
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(ApiError::Internal("socket table full".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert_eq!(body.error.message, "An internal error occurred");
    }
}
