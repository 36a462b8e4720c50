//! Status page client with per-attempt timeout and bounded retry.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use tokio::time::Instant;
use url::Url;

use crate::client::error::FetchError;
use crate::config::ClientConfig;
use crate::resilience::RetryPolicy;
use crate::status::StatusDocument;

/// HTTP client for status page summary endpoints.
///
/// Cheap to clone; the underlying connection pool is shared but holds no
/// per-probe state.
#[derive(Debug, Clone)]
pub struct StatusPageClient {
    http: reqwest::Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl StatusPageClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            timeout: config.timeout(),
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Fetch and decode the document at `url`.
    ///
    /// Transient failures are retried up to the policy's limit with backoff
    /// between attempts. When `deadline` is given, each attempt's timeout is
    /// clamped to the remaining time and no retry starts that could not
    /// finish its backoff before the deadline.
    pub async fn fetch(
        &self,
        url: &Url,
        deadline: Option<Instant>,
    ) -> Result<StatusDocument, FetchError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempts = 0;

        loop {
            let timeout = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(FetchError::DeadlineExceeded { attempts });
                    }
                    self.timeout.min(remaining)
                }
                None => self.timeout,
            };

            attempts += 1;
            let err = match self.attempt(url, timeout).await {
                Ok(doc) => {
                    if attempts > 1 {
                        tracing::debug!(url = %url, attempts, "Status page fetch recovered");
                    }
                    return Ok(doc);
                }
                Err(err) => err,
            };

            if !err.is_transient() {
                tracing::debug!(url = %url, attempt = attempts, error = %err, "Non-retryable fetch error");
                return Err(err);
            }

            if attempts >= max_attempts {
                tracing::warn!(url = %url, attempts, error = %err, "Status page fetch failed, retries exhausted");
                return Err(FetchError::Exhausted {
                    attempts,
                    last: Box::new(err),
                });
            }

            let delay = self.retry.delay_for(attempts);
            if let Some(deadline) = deadline {
                if Instant::now() + delay >= deadline {
                    tracing::warn!(url = %url, attempts, error = %err, "No time left for another attempt");
                    return Err(FetchError::DeadlineExceeded { attempts });
                }
            }

            tracing::info!(url = %url, attempt = attempts, delay = ?delay, error = %err, "Retrying status page fetch");
            tokio::time::sleep(delay).await;
        }
    }

    /// One GET with no retry.
    async fn attempt(&self, url: &Url, timeout: Duration) -> Result<StatusDocument, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        Ok(StatusDocument::from_slice(&body)?)
    }
}
