//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the tool makes:
//! - Building the reqwest client from the HTTP settings
//! - GET requests behind the [`Transport`] seam
//! - Exponential-backoff retry on transport failures
//! - Mapping the final response to an [`HttpOutcome`]

use crate::config::HttpSettings;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

/// Transport-level failure: no HTTP response was received
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// An HTTP response as seen by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body; empty for error statuses
    pub body: String,
}

/// Performs a single GET request
///
/// Returning `Err` means the request never produced a response and may be
/// retried. Any received status, including 4xx and 5xx, is an `Ok`.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `settings` - The HTTP settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```
/// use page_keeper::config::HttpSettings;
/// use page_keeper::fetch::build_http_client;
///
/// let client = build_http_client(&HttpSettings::default()).unwrap();
/// ```
pub fn build_http_client(settings: &HttpSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .redirect(Policy::limited(settings.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let request = self.client.get(url);

        async move {
            let response = request.send().await?;
            let status = response.status();

            // Error bodies are never used, so a broken one must not trigger a retry
            let body = if status.is_client_error() || status.is_server_error() {
                String::new()
            } else {
                response.text().await?
            };

            Ok(RawResponse {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Bounded exponential backoff
///
/// The delay before retry `n` (starting at 0) is `base_delay * 2^n`, so the
/// default policy waits 1s, 2s, 4s, 8s and 16s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &HttpSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.backoff_base_ms),
        }
    }

    /// Delays between attempts, one per allowed retry
    pub fn backoff(&self) -> impl Iterator<Item = Duration> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);

        // from_millis(2) yields 2f, 4f, 8f, ...; halved that is f, 2f, 4f
        ExponentialBackoff::from_millis(2)
            .factor(base_ms)
            .map(|delay| delay / 2)
            .take(self.max_retries as usize)
    }

    /// Delay to wait before retry number `retry` (0-based), if it is allowed
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        self.backoff().nth(retry as usize)
    }
}

/// Result of fetching one URL, retries included
///
/// The body is only present when the outcome is valid. Callers branch on
/// [`HttpOutcome::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    valid: bool,
    status: Option<u16>,
    body: Option<String>,
}

impl HttpOutcome {
    /// Outcome for a received response: valid iff the status is below 400
    pub fn from_response(response: RawResponse) -> Self {
        let valid = response.status < 400;
        Self {
            valid,
            status: Some(response.status),
            body: valid.then_some(response.body),
        }
    }

    /// Outcome after every attempt failed at the transport level
    pub fn failed() -> Self {
        Self {
            valid: false,
            status: None,
            body: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Status of the last response, if one was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn into_body(self) -> Option<String> {
        self.body
    }
}

/// Fetches pages, retrying transport failures
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl Fetcher<ReqwestTransport> {
    /// Builds a reqwest-backed fetcher from the HTTP settings
    pub fn from_settings(settings: &HttpSettings) -> Result<Self, reqwest::Error> {
        let client = build_http_client(settings)?;
        Ok(Self::new(
            ReqwestTransport::new(client),
            RetryPolicy::from_settings(settings),
        ))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `url`, never failing
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Status < 400 | Valid outcome with body |
    /// | Status >= 400 | Invalid outcome, not retried |
    /// | Transport error | Wait `base * 2^n`, retry up to `max_retries` times |
    /// | Retries exhausted | Invalid outcome without status or body |
    pub async fn fetch(&self, url: &str) -> HttpOutcome {
        let policy = self.policy;
        let mut failures = 0u32;

        // Error statuses arrive as Ok, so only transport errors are retried
        let result = RetryIf::spawn(
            policy.backoff(),
            || self.transport.get(url),
            |error: &TransportError| {
                if let Some(delay) = policy.delay_for(failures) {
                    tracing::warn!(
                        "Error fetching {}: {}. Retrying in {:?}. Retry count: {}",
                        url,
                        error,
                        delay,
                        failures + 1
                    );
                }
                failures += 1;
                true
            },
        )
        .await;

        match result {
            Ok(response) => {
                tracing::debug!("GET {} -> {}", url, response.status);
                HttpOutcome::from_response(response)
            }
            Err(error) => {
                tracing::warn!(
                    "Error fetching {} after {} retries. Last error: {}",
                    url,
                    policy.max_retries,
                    error
                );
                HttpOutcome::failed()
            }
        }
    }
}
