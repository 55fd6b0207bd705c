//! JSON client for the remote reclaim service.

use crate::config::ReclaimConfig;
use crate::core::constants::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF, RECLAIM_PATH,
    SCAN_PATH,
};
use crate::core::transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
use crate::error::{NetworkError, TransportError};
use crate::types::{
    PendingTransaction, ReclaimRequest, ReclaimableItem, ScanRequest, ScanResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded retry applied to transport failures only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF)
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the `/scan` and `/reclaim` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Client over `reqwest` using the endpoint, timeout and retry of `config`.
    pub fn from_config(config: &ReclaimConfig) -> Self {
        Self::new(Arc::new(ReqwestTransport::new(config.timeout)), &config.api_url)
            .with_retry(config.retry)
            .with_timeout(config.timeout)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Upper bound for each individual attempt.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a JSON request and return the parsed JSON body.
    ///
    /// Transport failures are retried per the [`RetryPolicy`]; HTTP error
    /// statuses are returned immediately as [`NetworkError::Rejected`].
    pub async fn send(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, NetworkError> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            body,
        };

        let response = self.execute_with_retry(&request).await?;
        debug!(url = %request.url, status = response.status, "response received");

        if !response.is_success() {
            return Err(rejection(&response));
        }

        serde_json::from_slice(&response.body).map_err(|e| NetworkError::InvalidBody(e.to_string()))
    }

    /// `POST /scan`
    pub async fn scan(&self, wallet_address: &str) -> Result<ScanResponse, NetworkError> {
        let request = ScanRequest {
            wallet_address: wallet_address.to_string(),
        };
        self.post_json(SCAN_PATH, &request).await
    }

    /// `POST /reclaim` for the given items
    pub async fn request_reclaim(
        &self,
        wallet_address: &str,
        items: &[ReclaimableItem],
    ) -> Result<PendingTransaction, NetworkError> {
        let request = ReclaimRequest {
            wallet_address: wallet_address.to_string(),
            items: items.iter().map(ReclaimableItem::to_wire).collect(),
        };
        self.post_json(RECLAIM_PATH, &request).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, NetworkError> {
        let body =
            serde_json::to_value(body).map_err(|e| NetworkError::InvalidBody(e.to_string()))?;
        let value = self.send(path, Method::POST, Some(body)).await?;
        serde_json::from_value(value).map_err(|e| NetworkError::InvalidBody(e.to_string()))
    }

    async fn execute_with_retry(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = match tokio::time::timeout(self.timeout, self.transport.execute(request))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(TransportError::Timeout(self.timeout)),
            };

            match outcome {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.retry.max_attempts => {
                    warn!(url = %request.url, attempt, "request failed, retrying: {}", e);
                    tokio::time::sleep(self.retry.backoff).await;
                },
                Err(e) => {
                    return Err(NetworkError::Unreachable {
                        attempts: attempt,
                        message: e.to_string(),
                    })
                },
            }
        }
    }
}

/// Error for a non-2xx response: the body's `error` field, else the status line.
fn rejection(response: &HttpResponse) -> NetworkError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {}: {}", response.status, response.status_text));

    NetworkError::Rejected {
        status: response.status,
        message,
    }
}
