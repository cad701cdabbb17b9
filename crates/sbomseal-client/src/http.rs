//! Bounded HTTP call primitive shared by all subsystem adapters.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::{RemoteError, Subsystem};

/// Timeout for liveness probes, regardless of the subsystem's call timeout.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Well-known liveness path exposed by every subsystem.
const HEALTH_PATH: &str = "health";

/// A fail-fast HTTP caller bound to one subsystem.
///
/// Every call is bounded by the subsystem's configured timeout and
/// classified into [`RemoteError`] on failure. No retries: a failed call
/// surfaces immediately and retry policy stays with the caller.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: Url,
    subsystem: Subsystem,
    timeout: Duration,
}

impl ServiceClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: Url,
        subsystem: Subsystem,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            subsystem,
            timeout,
        }
    }

    pub(crate) fn subsystem(&self) -> Subsystem {
        self.subsystem
    }

    fn url(&self, path: &str) -> String {
        // `Url` renders with a trailing slash; paths are given bare.
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn transport_error(&self, e: reqwest::Error) -> RemoteError {
        if e.is_timeout() {
            RemoteError::Timeout {
                subsystem: self.subsystem,
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            RemoteError::ConnectFailed {
                subsystem: self.subsystem,
                detail: e.to_string(),
            }
        }
    }

    async fn check_status(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, RemoteError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(RemoteError::UpstreamStatus {
            subsystem: self.subsystem,
            status,
            body,
        })
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, RemoteError> {
        let url = self.url(path);
        tracing::debug!(subsystem = %self.subsystem, %url, "POST");

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let resp = self.check_status(resp).await?;
        resp.json().await.map_err(|e| RemoteError::Decode {
            subsystem: self.subsystem,
            detail: format!("invalid JSON body: {e}"),
        })
    }

    /// POST a JSON body and return the raw response text.
    ///
    /// Used for mechanisms whose result is parsed from output lines
    /// rather than a JSON document (the ledger anchoring contract).
    pub async fn post_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, RemoteError> {
        let url = self.url(path);
        tracing::debug!(subsystem = %self.subsystem, %url, "POST (text)");

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let resp = self.check_status(resp).await?;
        resp.text().await.map_err(|e| RemoteError::Decode {
            subsystem: self.subsystem,
            detail: format!("unreadable body: {e}"),
        })
    }

    /// GET a JSON resource; a 404 is a normal "not found" outcome.
    pub async fn get_json(&self, path: &str) -> Result<Option<serde_json::Value>, RemoteError> {
        let url = self.url(path);
        tracing::debug!(subsystem = %self.subsystem, %url, "GET");

        let resp = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = self.check_status(resp).await?;
        resp.json().await.map(Some).map_err(|e| RemoteError::Decode {
            subsystem: self.subsystem,
            detail: format!("invalid JSON body: {e}"),
        })
    }

    /// Short-timeout liveness probe. Every failure reduces to `false`.
    pub async fn health(&self) -> bool {
        let url = self.url(HEALTH_PATH);
        match self
            .http
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!(subsystem = %self.subsystem, error = %e, "health check failed");
                false
            }
        }
    }
}
