//! Fetch error taxonomy.

use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

use crate::status::DecodeError;

/// Failure of a status page fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not establish a connection (refused, reset, TLS handshake).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Host name did not resolve.
    #[error("dns resolution failed: {0}")]
    Dns(String),

    /// Attempt exceeded its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Response arrived but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other request error (invalid request, redirect loop, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Body is not a status document.
    #[error("failed to parse status document: {0}")]
    Parse(#[from] DecodeError),

    /// The caller's deadline leaves no room for another attempt.
    #[error("deadline exceeded after {attempts} attempt(s)")]
    DeadlineExceeded { attempts: u32 },

    /// Every attempt failed with a transient error.
    #[error("giving up after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Connect(_) | FetchError::Timeout(_) | FetchError::Body(_) => true,
            FetchError::Status(status) => *status >= 500,
            FetchError::Dns(_)
            | FetchError::Request(_)
            | FetchError::Parse(_)
            | FetchError::DeadlineExceeded { .. }
            | FetchError::Exhausted { .. } => false,
        }
    }

    /// Classify a transport error from a single attempt.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout(timeout);
        }

        let detail = error_chain(&err);
        if is_dns_failure(&err) {
            FetchError::Dns(detail)
        } else if err.is_connect() {
            FetchError::Connect(detail)
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(detail)
        } else {
            FetchError::Request(detail)
        }
    }
}

/// Render an error together with its sources, `outer: inner: root`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

/// The connector reports resolver failures as "dns error".
fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string();
        if text.starts_with("dns error") || text.contains("failed to lookup address") {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Connect("refused".into()).is_transient());
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(FetchError::Status(500).is_transient());
        assert!(FetchError::Status(503).is_transient());

        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::Status(429).is_transient());
        assert!(!FetchError::Dns("no such host".into()).is_transient());
        assert!(!FetchError::Parse(DecodeError::Unrecognized).is_transient());
        assert!(!FetchError::DeadlineExceeded { attempts: 1 }.is_transient());
    }

    #[test]
    fn test_exhausted_names_last_cause() {
        let err = FetchError::Exhausted {
            attempts: 4,
            last: Box::new(FetchError::Status(502)),
        };
        assert_eq!(err.to_string(), "giving up after 4 attempt(s): unexpected HTTP status 502");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "inner cause");
        assert_eq!(error_chain(&inner), "inner cause");

        let err = FetchError::Exhausted {
            attempts: 2,
            last: Box::new(FetchError::Connect("refused".into())),
        };
        assert_eq!(
            error_chain(&err),
            "giving up after 2 attempt(s): connection failed: refused"
        );
    }
}
