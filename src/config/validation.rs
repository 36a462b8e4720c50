//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, bounded retries)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::ExporterConfig;
use crate::resilience::RetryPolicy;

/// Upper bound on `client.retry_count`; keeps probe latency predictable.
pub const MAX_RETRY_COUNT: u32 = 10;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("http_port must not be 0")]
    ZeroPort,

    #[error("client.timeout_secs must be a positive, representable number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("client.retry_count must be at most {max}, got {actual}")]
    TooManyRetries { actual: u32, max: u32 },

    #[error("client.backoff_base_ms ({base}) exceeds client.backoff_max_ms ({max})")]
    BackoffRange { base: u64, max: u64 },

    #[error("client.summary_path must start with '/', got '{0}'")]
    SummaryPath(String),

    #[error("server.request_timeout_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error(
        "server.request_timeout_secs ({request_timeout_secs}s) is shorter than the worst-case \
         probe latency ({worst_case:?}); lower client.timeout_secs or client.retry_count"
    )]
    RequestTimeoutTooShort {
        request_timeout_secs: u64,
        worst_case: Duration,
    },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.http_port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let timeout = config.client.timeout_secs;
    let attempt_timeout = Duration::try_from_secs_f64(timeout)
        .ok()
        .filter(|t| !t.is_zero());
    if attempt_timeout.is_none() {
        errors.push(ValidationError::InvalidTimeout(timeout));
    }

    if config.client.retry_count > MAX_RETRY_COUNT {
        errors.push(ValidationError::TooManyRetries {
            actual: config.client.retry_count,
            max: MAX_RETRY_COUNT,
        });
    }

    if config.client.backoff_base_ms > config.client.backoff_max_ms {
        errors.push(ValidationError::BackoffRange {
            base: config.client.backoff_base_ms,
            max: config.client.backoff_max_ms,
        });
    }

    if !config.client.summary_path.starts_with('/') {
        errors.push(ValidationError::SummaryPath(config.client.summary_path.clone()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if let Some(attempt_timeout) = attempt_timeout {
        let worst_case = RetryPolicy::from_config(&config.client).worst_case_latency(attempt_timeout);
        if worst_case > Duration::from_secs(config.server.request_timeout_secs) {
            errors.push(ValidationError::RequestTimeoutTooShort {
                request_timeout_secs: config.server.request_timeout_secs,
                worst_case,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
