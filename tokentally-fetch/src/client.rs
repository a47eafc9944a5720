//! HTTP client for the usage endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokentally_core::{UsageEnvelope, UsageRecord, UsageSource};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::retry::RetryPolicy;

/// Path appended to the base URL.
pub const USAGE_PATH: &str = "/api/trpc/usage";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `TokenTally`.
const USER_AGENT: &str = concat!("tokentally/", env!("CARGO_PKG_VERSION"));

/// Builds the usage URL for a base URL.
///
/// The base is used verbatim; a trailing slash yields `//api/trpc/usage`.
pub fn usage_url(base_url: &str) -> String {
    format!("{base_url}{USAGE_PATH}")
}

/// Fetches usage once with a default client.
///
/// # Errors
///
/// See [`UsageClient::get_usage`].
pub async fn get_usage(base_url: &str) -> Result<Vec<UsageRecord>, FetchError> {
    UsageClient::new()?.get_usage(base_url).await
}

// ============================================================================
// Usage Client
// ============================================================================

/// Client for the usage endpoint, retrying transient failures.
///
/// Cheap to clone; clones share the underlying connection pool and nothing
/// else.
#[derive(Debug, Clone)]
pub struct UsageClient {
    inner: Client,
    retry_policy: RetryPolicy,
}

impl UsageClient {
    /// Creates a client with the default timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP stack cannot be
    /// initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Returns a builder for a customized client.
    pub fn builder() -> UsageClientBuilder {
        UsageClientBuilder::default()
    }

    /// Returns the retry policy in use.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Binds the client to a base URL, producing a [`UsageSource`].
    pub fn bind(self, base_url: impl Into<String>) -> BoundUsageClient {
        BoundUsageClient {
            client: self,
            base_url: base_url.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Fetches usage records from `{base_url}/api/trpc/usage`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] if the last attempt failed in transport
    /// - [`FetchError::UnexpectedStatus`] if the last attempt got a non-200
    /// - [`FetchError::Decode`] if a 200 body was not a usage envelope
    pub async fn get_usage(&self, base_url: &str) -> Result<Vec<UsageRecord>, FetchError> {
        self.get_usage_with_cancel(base_url, &CancellationToken::new())
            .await
    }

    /// Like [`get_usage`](Self::get_usage), aborting when `cancel` fires.
    ///
    /// Cancellation interrupts both an in-flight request and a pending
    /// backoff sleep.
    ///
    /// # Errors
    ///
    /// As [`get_usage`](Self::get_usage), plus [`FetchError::Cancelled`].
    #[instrument(skip(self, cancel))]
    pub async fn get_usage_with_cancel(
        &self,
        base_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<UsageRecord>, FetchError> {
        let url = usage_url(base_url);
        let attempts = self.retry_policy.attempts();
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            debug!(url = %url, attempt = attempt + 1, attempts, "Making GET request");

            let outcome = tokio::select! {
                biased;

                _ = cancel.cancelled() => return Err(FetchError::Cancelled),

                outcome = self.fetch_once(&url) => outcome,
            };

            match outcome {
                Ok(records) => {
                    debug!(count = records.len(), "Usage decoded");
                    return Ok(records);
                }
                Err(e) if attempt + 1 < attempts && self.retry_policy.should_retry(&e) => {
                    let delay = self.retry_policy.delay_for_attempt(attempt);
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Request failed, retrying"
                    );

                    tokio::select! {
                        biased;

                        _ = cancel.cancelled() => return Err(FetchError::Cancelled),

                        () = tokio::time::sleep(delay) => {}
                    }

                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One request/response exchange.
    ///
    /// The response is consumed on success and dropped unread otherwise,
    /// which hands its connection back either way. A 200 whose body fails
    /// to arrive in full is a transport failure, not a decode failure, so it
    /// is retried like any other [`FetchError::Network`].
    async fn fetch_once(&self, url: &str) -> Result<Vec<UsageRecord>, FetchError> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        debug!(status = %status, "Response received");

        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        let envelope = UsageEnvelope::from_slice(&body).map_err(FetchError::Decode)?;

        Ok(envelope.into_records())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`UsageClient`].
#[derive(Debug, Clone)]
pub struct UsageClientBuilder {
    timeout: Duration,
    user_agent: String,
    retry_policy: RetryPolicy,
}

impl Default for UsageClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl UsageClientBuilder {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP stack cannot be
    /// initialized.
    pub fn build(self) -> Result<UsageClient, FetchError> {
        let inner = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(UsageClient {
            inner,
            retry_policy: self.retry_policy,
        })
    }
}

// ============================================================================
// Bound Client
// ============================================================================

/// A [`UsageClient`] fixed to one base URL.
#[derive(Debug, Clone)]
pub struct BoundUsageClient {
    client: UsageClient,
    base_url: String,
    cancel: CancellationToken,
}

impl BoundUsageClient {
    /// Aborts fetches when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl UsageSource for BoundUsageClient {
    type Error = FetchError;

    fn describe(&self) -> String {
        usage_url(&self.base_url)
    }

    async fn fetch_records(&self) -> Result<Vec<UsageRecord>, FetchError> {
        self.client
            .get_usage_with_cancel(&self.base_url, &self.cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_url_concatenates_verbatim() {
        assert_eq!(
            usage_url("http://localhost:3000"),
            "http://localhost:3000/api/trpc/usage"
        );
        assert_eq!(usage_url("http://h/"), "http://h//api/trpc/usage");
        assert_eq!(usage_url(""), "/api/trpc/usage");
    }

    #[test]
    fn test_builder_keeps_retry_policy() {
        let client = UsageClient::builder()
            .retry_policy(RetryPolicy::no_retry())
            .build()
            .unwrap();

        assert_eq!(client.retry_policy(), &RetryPolicy::no_retry());
    }

    #[test]
    fn test_bound_client_describes_endpoint() {
        let source = UsageClient::new().unwrap().bind("http://example.test");

        assert_eq!(source.base_url(), "http://example.test");
        assert_eq!(source.describe(), "http://example.test/api/trpc/usage");
    }
}
